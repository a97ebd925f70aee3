//! Persistence and session handling for the tracker aggregate.
//!
//! This crate saves and loads [`stats_core::AppData`] and owns the single
//! live instance on behalf of a front end.
//!
//! Modules are organized by responsibility:
//! - [`repository`] provides the store contracts, the JSON codec and the
//!   file and in-memory stores
//! - [`tracker`] hosts the session that ties one aggregate to one store
pub mod repository;
pub mod tracker;

pub use repository::{
    FileStore, InMemoryStore, RepositoryError, Result, Store, StoreReader, StoreWriter,
};
pub use tracker::Tracker;
