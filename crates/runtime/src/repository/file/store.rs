//! File-based Store implementation.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use stats_core::AppData;

use crate::repository::{
    RepositoryError, Result, Store, StoreReader, StoreWriter, document,
};

/// File-based implementation of [`Store`].
///
/// Keeps the aggregate as a single pretty-printed JSON document at a fixed
/// path. Writes go to a sibling `.tmp` file which is synced and then renamed
/// over the target, so readers only ever see the old or the new document.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for the document at `path`.
    ///
    /// Nothing is touched on disk until the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the path of the staging file used during writes.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Writes and syncs `bytes`; the handle is closed when it goes out of scope.
fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl StoreWriter for FileStore {
    fn write(&self, data: &AppData) -> Result<()> {
        let json = document::encode(data)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(RepositoryError::Io)?;
        }

        // Write to temp file
        let temp_path = self.temp_path();
        if let Err(err) = write_synced(&temp_path, json.as_bytes()) {
            let _ = fs::remove_file(&temp_path);
            return Err(RepositoryError::Io(err));
        }

        // Atomic rename
        if let Err(err) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(RepositoryError::Io(err));
        }

        tracing::debug!(
            "Saved {} players, {} rosters, {} matches to {}",
            data.players().len(),
            data.rosters().len(),
            data.matches().len(),
            self.path.display()
        );

        Ok(())
    }
}

impl StoreReader for FileStore {
    fn read(&self) -> Result<AppData> {
        let json = fs::read_to_string(&self.path).map_err(RepositoryError::Io)?;
        let data = document::decode(&json)?;

        tracing::debug!(
            "Loaded {} players, {} rosters, {} matches from {}",
            data.players().len(),
            data.rosters().len(),
            data.matches().len(),
            self.path.display()
        );

        Ok(data)
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl Store for FileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
