use super::MatchOutcome;
use crate::state::{ConsistencyError, StateError};

/// A tracked player and their cumulative record.
///
/// Counters start at zero and only move through [`crate::AppData::record_match`];
/// there are no setters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    username: String,
    games_played: u32,
    wins: u32,
    losses: u32,
    mvp_awards: u32,
}

impl Player {
    /// Creates a player with an empty record.
    pub fn new(username: impl Into<String>) -> Self {
        Self::restore(username, 0, 0, 0, 0)
    }

    /// Rebuilds a player from stored counters.
    ///
    /// Nothing is checked here. Only [`crate::AppData::from_parts`] admits a
    /// restored player, and it runs [`Player::validate`];
    /// [`crate::AppData::add_player`] refuses any player with a record.
    pub fn restore(
        username: impl Into<String>,
        games_played: u32,
        wins: u32,
        losses: u32,
        mvp_awards: u32,
    ) -> Self {
        Self {
            username: username.into(),
            games_played,
            wins,
            losses,
            mvp_awards,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn mvp_awards(&self) -> u32 {
        self.mvp_awards
    }

    /// True while every counter is still zero.
    pub fn is_unplayed(&self) -> bool {
        self.games_played == 0 && self.wins == 0 && self.losses == 0 && self.mvp_awards == 0
    }

    /// Games that ended level.
    pub fn ties(&self) -> u32 {
        self.games_played
            .saturating_sub(self.wins)
            .saturating_sub(self.losses)
    }

    /// Percentage of games won, `None` before the first game.
    pub fn win_rate(&self) -> Option<f64> {
        super::percentage(self.wins, self.games_played)
    }

    /// Checks `wins + losses <= games_played` and `mvp_awards <= games_played`.
    pub fn validate(&self) -> Result<(), ConsistencyError> {
        let decided = u64::from(self.wins) + u64::from(self.losses);
        if decided > u64::from(self.games_played) {
            return Err(ConsistencyError::PlayerRecord {
                username: self.username.clone(),
                games_played: self.games_played,
                wins: self.wins,
                losses: self.losses,
            });
        }
        if self.mvp_awards > self.games_played {
            return Err(ConsistencyError::MvpAwards {
                username: self.username.clone(),
                awards: self.mvp_awards,
                games_played: self.games_played,
            });
        }
        Ok(())
    }

    /// Returns this player's record after one more game.
    ///
    /// `self` is not touched, so callers can stage several updates and commit
    /// them together.
    pub(crate) fn after_match(&self, outcome: MatchOutcome, mvp: bool) -> Result<Self, StateError> {
        let bump = |value: u32, field: &'static str| {
            value
                .checked_add(1)
                .ok_or_else(|| StateError::CounterOverflow {
                    entity: format!("player '{}'", self.username),
                    field,
                })
        };

        let mut next = self.clone();
        next.games_played = bump(self.games_played, "games_played")?;
        match outcome {
            MatchOutcome::Win => next.wins = bump(self.wins, "wins")?,
            MatchOutcome::Loss => next.losses = bump(self.losses, "losses")?,
            MatchOutcome::Tie => {}
        }
        if mvp {
            next.mvp_awards = bump(self.mvp_awards, "mvp_awards")?;
        }
        Ok(next)
    }
}
