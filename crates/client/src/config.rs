//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Store location used when nothing else is configured.
pub const DEFAULT_STORE_PATH: &str = "./data/app_data.json";

/// File name of the log inside the log directory.
pub const LOG_FILE_NAME: &str = "trackgo.log";

/// Configuration required to open the store and set up logging.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub store_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_to_file: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            log_dir: default_log_dir(),
            log_to_file: true,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TRACKGO_STORE_PATH` - Store document path (default: `./data/app_data.json`)
    /// - `TRACKGO_LOG_DIR` - Log directory (default: platform-specific cache dir)
    /// - `TRACKGO_LOG_TO_FILE` - Write a log file (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("TRACKGO_STORE_PATH")
            && !path.is_empty()
        {
            config.store_path = PathBuf::from(path);
        }

        if let Ok(dir) = env::var("TRACKGO_LOG_DIR")
            && !dir.is_empty()
        {
            config.log_dir = PathBuf::from(dir);
        }

        if let Some(enable) = read_env::<bool>("TRACKGO_LOG_TO_FILE") {
            config.log_to_file = enable;
        }

        config
    }

    /// Log file path, `None` when file logging is off.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_to_file.then(|| self.log_dir.join(LOG_FILE_NAME))
    }
}

/// Get the platform-specific log directory
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/trackgo/logs`
/// - Linux: `~/.cache/trackgo/logs` (or `$XDG_CACHE_HOME/trackgo/logs`)
/// - Windows: `%LOCALAPPDATA%\trackgo\logs`
/// - Fallback: `/tmp/trackgo/logs`
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "trackgo")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/trackgo"))
        .join("logs")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
