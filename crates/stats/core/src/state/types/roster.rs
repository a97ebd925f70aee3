use super::MatchOutcome;
use crate::state::{ConsistencyError, StateError};

/// A team: an ordered list of player usernames and the team's record.
///
/// Members are references by key into [`crate::AppData`]'s players; the roster
/// never owns player data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    id: String,
    players: Vec<String>,
    games_played: u32,
    rounds_played: u32,
    wins: u32,
    losses: u32,
}

impl Roster {
    /// Creates an empty roster with no games.
    pub fn new(id: impl Into<String>) -> Self {
        Self::restore(id, Vec::new(), 0, 0, 0, 0)
    }

    /// Rebuilds a roster from stored fields without checking them.
    ///
    /// Only [`crate::AppData::from_parts`] admits a restored roster with a record.
    pub fn restore(
        id: impl Into<String>,
        players: Vec<String>,
        games_played: u32,
        rounds_played: u32,
        wins: u32,
        losses: u32,
    ) -> Self {
        Self {
            id: id.into(),
            players,
            games_played,
            rounds_played,
            wins,
            losses,
        }
    }

    /// Adds member references before the roster joins an aggregate.
    pub fn with_players<I, S>(mut self, usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.players.extend(usernames.into_iter().map(Into::into));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Member usernames in roster order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn contains(&self, username: &str) -> bool {
        self.players.iter().any(|member| member == username)
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    /// True while every counter is still zero.
    pub fn is_unplayed(&self) -> bool {
        self.games_played == 0 && self.rounds_played == 0 && self.wins == 0 && self.losses == 0
    }

    pub fn ties(&self) -> u32 {
        self.games_played
            .saturating_sub(self.wins)
            .saturating_sub(self.losses)
    }

    /// Percentage of games won, `None` before the first game.
    pub fn win_rate(&self) -> Option<f64> {
        super::percentage(self.wins, self.games_played)
    }

    /// Checks the team record and that no member is listed twice.
    ///
    /// Whether members exist is the aggregate's concern.
    pub fn validate(&self) -> Result<(), ConsistencyError> {
        let decided = u64::from(self.wins) + u64::from(self.losses);
        if decided > u64::from(self.games_played) {
            return Err(ConsistencyError::RosterRecord {
                id: self.id.clone(),
                games_played: self.games_played,
                wins: self.wins,
                losses: self.losses,
            });
        }
        for (index, member) in self.players.iter().enumerate() {
            if self.players[..index].contains(member) {
                return Err(ConsistencyError::DuplicateMember {
                    roster: self.id.clone(),
                    username: member.clone(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn push_member(&mut self, username: String) {
        self.players.push(username);
    }

    /// Drops a member reference; returns false when it was not listed.
    pub(crate) fn remove_member(&mut self, username: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|member| member != username);
        self.players.len() != before
    }

    /// Returns the team's record after one more game of `total_rounds` rounds.
    pub(crate) fn after_match(
        &self,
        outcome: MatchOutcome,
        total_rounds: u32,
    ) -> Result<Self, StateError> {
        let overflow = |field: &'static str| StateError::CounterOverflow {
            entity: format!("roster '{}'", self.id),
            field,
        };

        let mut next = self.clone();
        next.games_played = self
            .games_played
            .checked_add(1)
            .ok_or_else(|| overflow("games_played"))?;
        next.rounds_played = self
            .rounds_played
            .checked_add(total_rounds)
            .ok_or_else(|| overflow("rounds_played"))?;
        match outcome {
            MatchOutcome::Win => {
                next.wins = self.wins.checked_add(1).ok_or_else(|| overflow("wins"))?;
            }
            MatchOutcome::Loss => {
                next.losses = self
                    .losses
                    .checked_add(1)
                    .ok_or_else(|| overflow("losses"))?;
            }
            MatchOutcome::Tie => {}
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_rate_is_guarded_before_first_game() {
        let roster = Roster::new("teamA");
        assert_eq!(roster.win_rate(), None);

        let roster = Roster::restore("teamA", vec![], 4, 60, 3, 0);
        assert_eq!(roster.win_rate(), Some(75.0));
        assert_eq!(roster.ties(), 1);
    }

    #[test]
    fn after_match_adds_rounds() {
        let roster = Roster::new("teamA").with_players(["ace", "bolt"]);
        let next = roster.after_match(MatchOutcome::Loss, 22).unwrap();
        assert_eq!(next.games_played(), 1);
        assert_eq!(next.rounds_played(), 22);
        assert_eq!((next.wins(), next.losses()), (0, 1));
        assert_eq!(next.players(), roster.players());
    }

    #[test]
    fn after_match_reports_round_overflow() {
        let roster = Roster::restore("teamA", vec!["ace".into()], 1, u32::MAX - 5, 0, 0);
        let err = roster.after_match(MatchOutcome::Win, 10).unwrap_err();
        assert!(matches!(
            err,
            StateError::CounterOverflow {
                field: "rounds_played",
                ..
            }
        ));
    }

    #[test]
    fn remove_member_reports_absence() {
        let mut roster = Roster::new("teamA").with_players(["ace", "bolt"]);
        assert!(roster.remove_member("ace"));
        assert!(!roster.remove_member("ace"));
        assert_eq!(roster.players(), ["bolt".to_string()]);
    }

    #[test]
    fn validate_rejects_duplicate_members() {
        let roster = Roster::new("teamA").with_players(["ace", "bolt", "ace"]);
        assert_eq!(
            roster.validate(),
            Err(ConsistencyError::DuplicateMember {
                roster: "teamA".into(),
                username: "ace".into(),
            })
        );
    }
}
