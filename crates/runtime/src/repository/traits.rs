//! Store contracts for saving and loading the tracker aggregate.

use stats_core::AppData;

use super::Result;

/// Reads a complete aggregate back from a durable representation.
///
/// Implementations validate before returning: a document that fails to parse
/// or breaks a data-model invariant yields an error and no aggregate, so the
/// caller's current state is never partially replaced.
pub trait StoreReader: Send + Sync {
    /// Parse and validate the stored document.
    fn read(&self) -> Result<AppData>;

    /// Check whether a document is present at all.
    fn exists(&self) -> bool;
}

/// Writes a complete aggregate to a durable representation.
///
/// A write fully replaces any previous document. It either produces a
/// complete, parseable artifact or fails leaving the previous one intact.
pub trait StoreWriter: Send + Sync {
    fn write(&self, data: &AppData) -> Result<()>;
}

/// A location that can be both written and read back.
pub trait Store: StoreReader + StoreWriter {
    /// Human-readable description of where the document lives.
    fn location(&self) -> String;
}
