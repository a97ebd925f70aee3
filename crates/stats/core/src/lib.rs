//! Statistics data model for competitive-game tracking.
//!
//! `stats-core` defines players, rosters, matches and the [`AppData`]
//! aggregate that owns them. It performs no I/O: persistence lives in
//! `stats-runtime`, which assembles aggregates through
//! [`AppData::from_parts`] and reads them back through the accessors.
//! All counter changes flow through [`AppData::record_match`].
pub mod error;
pub mod state;

pub use error::{ErrorSeverity, StatsError};
pub use state::{
    AppData, Collection, ConsistencyError, HistoryDivergence, Match, MatchId, MatchOutcome,
    MatchReport, Player, Roster, StateError,
};
