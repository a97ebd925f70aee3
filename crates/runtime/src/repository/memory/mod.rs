//! In-memory store implementation for tests and local runs.

mod store;

pub use store::InMemoryStore;
