//! Session owner for the tracker aggregate.
//!
//! [`Tracker`] holds the single [`AppData`] instance for the life of the
//! process together with the store it is loaded from and saved to. A load
//! replaces the aggregate only once the stored document has been fully read
//! and validated; a save never changes it.

use stats_core::AppData;

use crate::repository::{Result, Store};

pub struct Tracker {
    data: AppData,
    store: Box<dyn Store>,
}

impl Tracker {
    /// Start a session with an empty aggregate.
    pub fn new(store: impl Store + 'static) -> Self {
        Self::with_data(store, AppData::new())
    }

    /// Start a session with an existing aggregate.
    pub fn with_data(store: impl Store + 'static, data: AppData) -> Self {
        Self {
            data,
            store: Box::new(store),
        }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    /// Mutable access for add/remove/record operations.
    pub fn data_mut(&mut self) -> &mut AppData {
        &mut self.data
    }

    pub fn location(&self) -> String {
        self.store.location()
    }

    /// Replace the aggregate with the stored one.
    ///
    /// On error the current aggregate is left exactly as it was.
    pub fn load(&mut self) -> Result<()> {
        match self.store.read() {
            Ok(data) => {
                self.data = data;
                tracing::info!(
                    "Loaded tracker data from {} ({} players, {} rosters, {} matches)",
                    self.store.location(),
                    self.data.players().len(),
                    self.data.rosters().len(),
                    self.data.matches().len()
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    "Failed to load tracker data from {}: {}",
                    self.store.location(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Like [`Tracker::load`], but a store with no document yet is not an
    /// error. The current aggregate is kept in that case, which for a fresh
    /// session is the empty one. Returns whether a document was loaded.
    pub fn load_or_default(&mut self) -> Result<bool> {
        if !self.store.exists() {
            tracing::info!(
                "No tracker data at {}, keeping current data",
                self.store.location()
            );
            return Ok(false);
        }
        self.load().map(|()| true)
    }

    /// Write the current aggregate, replacing the stored document.
    pub fn save(&self) -> Result<()> {
        match self.store.write(&self.data) {
            Ok(()) => {
                tracing::info!("Saved tracker data to {}", self.store.location());
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    "Failed to save tracker data to {}: {}",
                    self.store.location(),
                    err
                );
                Err(err)
            }
        }
    }

    /// End the session, handing back the aggregate.
    pub fn into_data(self) -> AppData {
        self.data
    }
}
