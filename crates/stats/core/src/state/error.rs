//! State management errors.
//!
//! [`StateError`] is returned by in-memory mutations on [`crate::AppData`];
//! every variant guarantees the aggregate was left untouched.
//! [`ConsistencyError`] describes a data-model invariant that does not hold for
//! an aggregate assembled from stored parts.

use crate::error::{ErrorSeverity, StatsError};
use crate::state::MatchId;

/// Keyed collection an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
pub enum Collection {
    #[strum(to_string = "player")]
    Players,
    #[strum(to_string = "roster")]
    Rosters,
    #[strum(to_string = "match")]
    Matches,
    #[strum(to_string = "roster member")]
    RosterMembers,
}

/// Errors raised by mutations of the aggregate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StateError {
    /// Insert with a key that is already present.
    #[error("{collection} '{key}' already exists")]
    DuplicateKey { collection: Collection, key: String },

    /// A new player or roster must start without a record.
    #[error("{collection} '{key}' already has a record")]
    RecordNotEmpty { collection: Collection, key: String },

    /// Reference to a key that is not present.
    #[error("{collection} '{key}' not found")]
    NotFound { collection: Collection, key: String },

    /// A match cannot be recorded for a roster without players.
    #[error("roster '{roster}' has no players")]
    EmptyRoster { roster: String },

    /// Applying the match would overflow a counter.
    #[error("{field} of {entity} would overflow")]
    CounterOverflow { entity: String, field: &'static str },

    /// Every match id has been handed out.
    #[error("no match ids left after {last}")]
    MatchIdExhausted { last: MatchId },

    /// An entity handed to the aggregate breaks an invariant on its own.
    #[error(transparent)]
    Inconsistent(#[from] ConsistencyError),
}

impl StateError {
    pub(crate) fn duplicate(collection: Collection, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            collection,
            key: key.into(),
        }
    }

    pub(crate) fn not_found(collection: Collection, key: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            key: key.into(),
        }
    }
}

impl StatsError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateKey { .. }
            | Self::NotFound { .. }
            | Self::RecordNotEmpty { .. }
            | Self::EmptyRoster { .. }
            | Self::Inconsistent(_) => ErrorSeverity::Validation,
            Self::CounterOverflow { .. } | Self::MatchIdExhausted { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        self.into()
    }
}

/// Invariant violations found while validating an aggregate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ConsistencyError {
    #[error("duplicate player '{username}'")]
    DuplicatePlayer { username: String },

    #[error("duplicate roster '{id}'")]
    DuplicateRoster { id: String },

    #[error("duplicate match {id}")]
    DuplicateMatch { id: MatchId },

    #[error("roster '{roster}' lists player '{username}' more than once")]
    DuplicateMember { roster: String, username: String },

    #[error("roster '{roster}' references unknown player '{username}'")]
    UnknownMember { roster: String, username: String },

    #[error("{field} of {entity} is negative ({value})")]
    NegativeCounter {
        entity: String,
        field: &'static str,
        value: i64,
    },

    #[error(
        "player '{username}' has {wins} wins and {losses} losses in {games_played} games"
    )]
    PlayerRecord {
        username: String,
        games_played: u32,
        wins: u32,
        losses: u32,
    },

    #[error("player '{username}' has {awards} MVP awards in {games_played} games")]
    MvpAwards {
        username: String,
        awards: u32,
        games_played: u32,
    },

    #[error("roster '{id}' has {wins} wins and {losses} losses in {games_played} games")]
    RosterRecord {
        id: String,
        games_played: u32,
        wins: u32,
        losses: u32,
    },

    #[error("match {id} has an empty player snapshot")]
    EmptySnapshot { id: MatchId },

    #[error("match {id} names MVP '{username}' who is not in its snapshot")]
    UnknownMvp { id: MatchId, username: String },
}

impl StatsError for ConsistencyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_collection() {
        let err = StateError::duplicate(Collection::Players, "ace");
        assert_eq!(err.to_string(), "player 'ace' already exists");

        let err = StateError::not_found(Collection::RosterMembers, "ace");
        assert_eq!(err.to_string(), "roster member 'ace' not found");
    }

    #[test]
    fn error_codes_are_variant_names() {
        let err = StateError::not_found(Collection::Rosters, "teamA");
        assert_eq!(err.error_code(), "not_found");
        assert_eq!(err.severity(), ErrorSeverity::Validation);

        let err = ConsistencyError::EmptySnapshot { id: MatchId(4) };
        assert_eq!(err.error_code(), "empty_snapshot");
        assert!(err.severity().is_internal());
    }

    #[test]
    fn inconsistent_wraps_the_violation() {
        let err: StateError = ConsistencyError::DuplicateRoster { id: "x".into() }.into();
        assert_eq!(err.to_string(), "duplicate roster 'x'");
        assert_eq!(err.error_code(), "inconsistent");
    }
}
