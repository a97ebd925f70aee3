//! Common error infrastructure for stats-core.
//!
//! Concrete error enums live next to the data they guard (see
//! [`crate::state::StateError`] and [`crate::state::ConsistencyError`]). This
//! module only carries the classification shared by every layer, so the
//! runtime and the client can decide how loudly to report a failure.

/// Severity level of an error, used for categorization and reporting.
///
/// - **Recoverable**: the medium was unavailable; repeating the same request may succeed
/// - **Validation**: the request itself was invalid and was rejected without side effects
/// - **Internal**: arithmetic limits were hit; the aggregate is unchanged
/// - **Fatal**: stored data violates the data model and cannot be used
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns true if repeating the operation unchanged may succeed.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if the error points at corrupted or impossible state.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tracker errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Derive `strum::IntoStaticStr` so [`StatsError::error_code`] is the variant name
/// - Classify severity by what the caller can do about it, not by impact
pub trait StatsError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
