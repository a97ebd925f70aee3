use core::fmt;

use super::Player;

/// Identifier of a recorded match, unique within an aggregate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MatchId(pub u32);

impl MatchId {
    /// Id handed to the first match of an empty aggregate.
    pub const FIRST: MatchId = MatchId(1);

    pub fn next(self) -> Option<MatchId> {
        self.0.checked_add(1).map(MatchId)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of a match from the recording roster's point of view.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MatchOutcome {
    Win,
    Loss,
    Tie,
}

impl MatchOutcome {
    /// More rounds won than lost is a win, fewer a loss, equal a tie.
    pub fn from_rounds(rounds_won: u32, rounds_lost: u32) -> Self {
        match rounds_won.cmp(&rounds_lost) {
            core::cmp::Ordering::Greater => Self::Win,
            core::cmp::Ordering::Less => Self::Loss,
            core::cmp::Ordering::Equal => Self::Tie,
        }
    }
}

/// Everything needed to record one completed game against a roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchReport {
    pub roster_id: String,
    pub rounds_won: u32,
    pub rounds_lost: u32,
    pub map: String,
    /// Member of the roster who earned the MVP award, if one was given.
    pub mvp: Option<String>,
}

impl MatchReport {
    pub fn new(
        roster_id: impl Into<String>,
        rounds_won: u32,
        rounds_lost: u32,
        map: impl Into<String>,
    ) -> Self {
        Self {
            roster_id: roster_id.into(),
            rounds_won,
            rounds_lost,
            map: map.into(),
            mvp: None,
        }
    }

    #[must_use]
    pub fn with_mvp(mut self, username: impl Into<String>) -> Self {
        self.mvp = Some(username.into());
        self
    }

    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_rounds(self.rounds_won, self.rounds_lost)
    }
}

/// An immutable record of one completed game.
///
/// `players` is a frozen copy of the roster's players taken when the match was
/// recorded; later roster or player changes never reach it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    id: MatchId,
    roster_id: String,
    players: Vec<Player>,
    rounds_won: u32,
    rounds_lost: u32,
    map: String,
    mvp: Option<String>,
}

impl Match {
    /// Rebuilds a match from stored fields without checking them.
    pub fn restore(
        id: MatchId,
        roster_id: impl Into<String>,
        players: Vec<Player>,
        rounds_won: u32,
        rounds_lost: u32,
        map: impl Into<String>,
        mvp: Option<String>,
    ) -> Self {
        Self {
            id,
            roster_id: roster_id.into(),
            players,
            rounds_won,
            rounds_lost,
            map: map.into(),
            mvp,
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Roster the match was recorded against. It may since have been removed.
    pub fn roster_id(&self) -> &str {
        &self.roster_id
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn rounds_won(&self) -> u32 {
        self.rounds_won
    }

    pub fn rounds_lost(&self) -> u32 {
        self.rounds_lost
    }

    pub fn total_rounds(&self) -> u64 {
        u64::from(self.rounds_won) + u64::from(self.rounds_lost)
    }

    pub fn map(&self) -> &str {
        &self.map
    }

    pub fn mvp(&self) -> Option<&str> {
        self.mvp.as_deref()
    }

    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_rounds(self.rounds_won, self.rounds_lost)
    }
}
