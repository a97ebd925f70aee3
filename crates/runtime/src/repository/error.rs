//! Error types raised by store implementations.

use stats_core::{ConsistencyError, ErrorSeverity, StatsError};
use thiserror::Error;

/// Errors surfaced by store implementations.
#[derive(Debug, Error, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RepositoryError {
    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed store document: {0}")]
    Format(String),

    #[error("store document is inconsistent: {0}")]
    Consistency(#[from] ConsistencyError),

    #[error("JSON error: {0}")]
    Json(String),
}

impl RepositoryError {
    /// True when the document parsed but broke a data-model invariant.
    pub fn is_consistency(&self) -> bool {
        matches!(self, Self::Consistency(_))
    }

    /// True when the document could not be parsed into the expected shape.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// True when there was nothing to read.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}

impl StatsError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io(_) => ErrorSeverity::Recoverable,
            Self::Format(_) | Self::Consistency(_) => ErrorSeverity::Fatal,
            Self::LockPoisoned | Self::Json(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        self.into()
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
