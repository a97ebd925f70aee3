//! Repository layer for the tracker aggregate.
//!
//! The aggregate is saved and loaded as one JSON document:
//! - [`document`] is the codec shared by every store
//! - [`FileStore`] keeps the document on disk
//! - [`InMemoryStore`] keeps it in memory for tests and dry runs

pub mod document;
mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use traits::{Store, StoreReader, StoreWriter};
