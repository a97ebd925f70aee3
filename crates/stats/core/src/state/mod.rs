//! Authoritative tracker state.
//!
//! [`AppData`] owns every player, roster and match. Rosters refer to players
//! by username and are resolved through the aggregate; matches hold frozen
//! copies. Counters change only through [`AppData::record_match`], which
//! stages every update before committing any of them.
mod error;
pub mod types;
mod validate;

use indexmap::IndexMap;

pub use error::{Collection, ConsistencyError, StateError};
pub use types::{Match, MatchId, MatchOutcome, MatchReport, Player, Roster};
pub use validate::HistoryDivergence;

/// The aggregate root: the unit of load and save.
///
/// All three collections keep insertion order for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppData {
    players: IndexMap<String, Player>,
    rosters: IndexMap<String, Roster>,
    matches: IndexMap<MatchId, Match>,
    /// `None` once the id space is used up.
    next_match_id: Option<MatchId>,
}

impl Default for AppData {
    fn default() -> Self {
        Self::new()
    }
}

impl AppData {
    /// Creates an empty aggregate.
    pub fn new() -> Self {
        Self {
            players: IndexMap::new(),
            rosters: IndexMap::new(),
            matches: IndexMap::new(),
            next_match_id: Some(MatchId::FIRST),
        }
    }

    // ------------------------------------------------------------------
    // Players
    // ------------------------------------------------------------------

    /// Adds a player with an empty record.
    ///
    /// # Errors
    ///
    /// - [`StateError::DuplicateKey`] if the username is taken
    /// - [`StateError::RecordNotEmpty`] if any counter is non-zero
    pub fn add_player(&mut self, player: Player) -> Result<&Player, StateError> {
        if self.players.contains_key(player.username()) {
            return Err(StateError::duplicate(Collection::Players, player.username()));
        }
        if !player.is_unplayed() {
            return Err(StateError::RecordNotEmpty {
                collection: Collection::Players,
                key: player.username().to_owned(),
            });
        }

        let entry = self
            .players
            .entry(player.username().to_owned())
            .or_insert(player);
        Ok(&*entry)
    }

    /// Removes a player and drops it from every roster.
    ///
    /// Match snapshots keep their copy of the player.
    pub fn remove_player(&mut self, username: &str) -> Result<Player, StateError> {
        let player = self
            .players
            .shift_remove(username)
            .ok_or_else(|| StateError::not_found(Collection::Players, username))?;

        for roster in self.rosters.values_mut() {
            roster.remove_member(username);
        }
        Ok(player)
    }

    pub fn player(&self, username: &str) -> Option<&Player> {
        self.players.get(username)
    }

    /// Players in insertion order.
    pub fn players(&self) -> impl ExactSizeIterator<Item = &Player> {
        self.players.values()
    }

    // ------------------------------------------------------------------
    // Rosters
    // ------------------------------------------------------------------

    /// Adds a roster with an empty record.
    ///
    /// # Errors
    ///
    /// - [`StateError::DuplicateKey`] if the id is taken
    /// - [`StateError::RecordNotEmpty`] if any counter is non-zero
    /// - [`StateError::NotFound`] if a member is not a known player
    /// - [`StateError::Inconsistent`] if a member repeats
    pub fn add_roster(&mut self, roster: Roster) -> Result<&Roster, StateError> {
        if self.rosters.contains_key(roster.id()) {
            return Err(StateError::duplicate(Collection::Rosters, roster.id()));
        }
        if !roster.is_unplayed() {
            return Err(StateError::RecordNotEmpty {
                collection: Collection::Rosters,
                key: roster.id().to_owned(),
            });
        }
        roster.validate()?;
        if let Some(missing) = roster
            .players()
            .iter()
            .find(|username| !self.players.contains_key(username.as_str()))
        {
            return Err(StateError::not_found(Collection::Players, missing.as_str()));
        }

        let entry = self.rosters.entry(roster.id().to_owned()).or_insert(roster);
        Ok(&*entry)
    }

    /// Removes a roster. Matches recorded against it are kept.
    pub fn remove_roster(&mut self, id: &str) -> Result<Roster, StateError> {
        self.rosters
            .shift_remove(id)
            .ok_or_else(|| StateError::not_found(Collection::Rosters, id))
    }

    /// Appends an existing player to a roster.
    pub fn assign_player(&mut self, roster_id: &str, username: &str) -> Result<(), StateError> {
        if !self.players.contains_key(username) {
            return Err(StateError::not_found(Collection::Players, username));
        }
        let roster = self
            .rosters
            .get_mut(roster_id)
            .ok_or_else(|| StateError::not_found(Collection::Rosters, roster_id))?;
        if roster.contains(username) {
            return Err(StateError::duplicate(Collection::RosterMembers, username));
        }

        roster.push_member(username.to_owned());
        Ok(())
    }

    /// Removes a player from a roster without touching the player.
    pub fn unassign_player(&mut self, roster_id: &str, username: &str) -> Result<(), StateError> {
        let roster = self
            .rosters
            .get_mut(roster_id)
            .ok_or_else(|| StateError::not_found(Collection::Rosters, roster_id))?;

        if roster.remove_member(username) {
            Ok(())
        } else {
            Err(StateError::not_found(Collection::RosterMembers, username))
        }
    }

    pub fn roster(&self, id: &str) -> Option<&Roster> {
        self.rosters.get(id)
    }

    /// Rosters in insertion order.
    pub fn rosters(&self) -> impl ExactSizeIterator<Item = &Roster> {
        self.rosters.values()
    }

    /// Resolves a roster's member references to players, in roster order.
    pub fn roster_players(&self, id: &str) -> Result<Vec<&Player>, StateError> {
        let roster = self
            .rosters
            .get(id)
            .ok_or_else(|| StateError::not_found(Collection::Rosters, id))?;

        roster
            .players()
            .iter()
            .map(|username| {
                self.players
                    .get(username.as_str())
                    .ok_or_else(|| StateError::not_found(Collection::Players, username.as_str()))
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Matches
    // ------------------------------------------------------------------

    /// Records a completed game without an MVP award.
    ///
    /// See [`AppData::record`].
    pub fn record_match(
        &mut self,
        roster_id: &str,
        rounds_won: u32,
        rounds_lost: u32,
        map: &str,
    ) -> Result<&Match, StateError> {
        self.record(MatchReport::new(roster_id, rounds_won, rounds_lost, map))
    }

    /// Records a completed game against a roster.
    ///
    /// The roster gains one game, `rounds_won + rounds_lost` rounds and a win
    /// or loss (nothing for a tie). Every member gains one game and the same
    /// win or loss; the MVP, if any, gains an award. The match stores a copy of
    /// the members as they stand after the update.
    ///
    /// All new values are computed first and committed together, so on error
    /// nothing has changed.
    ///
    /// # Errors
    ///
    /// - [`StateError::NotFound`] for an unknown roster, or an MVP who is not a member
    /// - [`StateError::EmptyRoster`] if the roster has no players
    /// - [`StateError::CounterOverflow`] / [`StateError::MatchIdExhausted`] at numeric limits
    pub fn record(&mut self, report: MatchReport) -> Result<&Match, StateError> {
        let roster = self
            .rosters
            .get(&report.roster_id)
            .ok_or_else(|| StateError::not_found(Collection::Rosters, report.roster_id.as_str()))?;

        if roster.players().is_empty() {
            return Err(StateError::EmptyRoster {
                roster: report.roster_id,
            });
        }
        if let Some(mvp) = report.mvp.as_deref()
            && !roster.contains(mvp)
        {
            return Err(StateError::not_found(Collection::RosterMembers, mvp));
        }

        let id = self.next_match_id.ok_or_else(|| StateError::MatchIdExhausted {
            last: MatchId(u32::MAX),
        })?;
        let outcome = report.outcome();
        let total_rounds = report
            .rounds_won
            .checked_add(report.rounds_lost)
            .ok_or_else(|| StateError::CounterOverflow {
                entity: format!("roster '{}'", roster.id()),
                field: "rounds_played",
            })?;

        // Stage
        let staged_roster = roster.after_match(outcome, total_rounds)?;
        let staged_players = roster
            .players()
            .iter()
            .map(|username| {
                let player = self
                    .players
                    .get(username.as_str())
                    .ok_or_else(|| StateError::not_found(Collection::Players, username.as_str()))?;
                player.after_match(outcome, report.mvp.as_deref() == Some(username.as_str()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Commit
        for player in &staged_players {
            self.players
                .insert(player.username().to_owned(), player.clone());
        }
        self.rosters
            .insert(staged_roster.id().to_owned(), staged_roster);
        self.next_match_id = id.next();

        let record = Match::restore(
            id,
            report.roster_id,
            staged_players,
            report.rounds_won,
            report.rounds_lost,
            report.map,
            report.mvp,
        );
        Ok(&*self.matches.entry(id).or_insert(record))
    }

    pub fn match_by_id(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(&id)
    }

    /// Matches in recording order.
    pub fn matches(&self) -> impl ExactSizeIterator<Item = &Match> {
        self.matches.values()
    }

    /// Matches attributed to a roster id, including ones recorded before the
    /// roster was removed and re-added.
    pub fn matches_for_roster<'a>(&'a self, roster_id: &'a str) -> impl Iterator<Item = &'a Match> {
        self.matches
            .values()
            .filter(move |record| record.roster_id() == roster_id)
    }

    /// Id the next recorded match will receive.
    pub fn next_match_id(&self) -> Option<MatchId> {
        self.next_match_id
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.rosters.is_empty() && self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorSeverity, StatsError};

    fn team_a() -> AppData {
        let mut data = AppData::new();
        data.add_player(Player::new("ace")).unwrap();
        data.add_player(Player::new("bolt")).unwrap();
        data.add_roster(Roster::new("teamA").with_players(["ace", "bolt"]))
            .unwrap();
        data
    }

    #[test]
    fn add_player_rejects_duplicates() {
        let mut data = team_a();
        let before = data.clone();

        let err = data.add_player(Player::new("ace")).unwrap_err();
        assert_eq!(err, StateError::duplicate(Collection::Players, "ace"));
        assert_eq!(data, before);
    }

    #[test]
    fn add_player_rejects_existing_record() {
        let mut data = team_a();
        data.remove_player("ace").unwrap();
        let before = data.clone();

        let err = data
            .add_player(Player::restore("ace", 50, 50, 0, 50))
            .unwrap_err();
        assert_eq!(
            err,
            StateError::RecordNotEmpty {
                collection: Collection::Players,
                key: "ace".into(),
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(data, before);

        // Even a record that only carries a loss is refused.
        assert!(data.add_player(Player::restore("ace", 1, 0, 1, 0)).is_err());
        assert!(data.player("ace").is_none());
    }

    #[test]
    fn add_roster_rejects_existing_record() {
        let mut data = team_a();
        data.remove_roster("teamA").unwrap();
        let before = data.clone();

        let err = data
            .add_roster(Roster::restore("teamA", vec!["ace".into()], 99, 2000, 99, 0))
            .unwrap_err();
        assert_eq!(
            err,
            StateError::RecordNotEmpty {
                collection: Collection::Rosters,
                key: "teamA".into(),
            }
        );
        assert_eq!(data, before);

        let err = data
            .add_roster(Roster::restore("teamA", vec![], 0, 13, 0, 0))
            .unwrap_err();
        assert!(matches!(err, StateError::RecordNotEmpty { .. }));
        assert!(data.history_divergences().is_empty());
        assert_eq!(data.matches().len(), 0);
    }

    #[test]
    fn add_roster_rejects_repeated_member() {
        let mut data = team_a();
        let err = data
            .add_roster(Roster::new("teamB").with_players(["ace", "ace"]))
            .unwrap_err();
        assert!(matches!(
            err,
            StateError::Inconsistent(ConsistencyError::DuplicateMember { .. })
        ));
    }

    #[test]
    fn add_roster_requires_known_players() {
        let mut data = team_a();
        let err = data
            .add_roster(Roster::new("teamB").with_players(["ace", "ghost"]))
            .unwrap_err();
        assert_eq!(err, StateError::not_found(Collection::Players, "ghost"));
        assert!(data.roster("teamB").is_none());

        let err = data.add_roster(Roster::new("teamA")).unwrap_err();
        assert_eq!(err, StateError::duplicate(Collection::Rosters, "teamA"));
    }

    #[test]
    fn remove_unknown_keys() {
        let mut data = team_a();
        assert_eq!(
            data.remove_player("ghost").unwrap_err(),
            StateError::not_found(Collection::Players, "ghost")
        );
        assert_eq!(
            data.remove_roster("teamZ").unwrap_err(),
            StateError::not_found(Collection::Rosters, "teamZ")
        );
    }

    #[test]
    fn record_match_win_updates_roster_and_players() {
        let mut data = team_a();

        let record = data.record_match("teamA", 13, 7, "mapX").unwrap();
        assert_eq!(record.id(), MatchId::FIRST);
        assert_eq!(record.total_rounds(), 20);
        assert_eq!(record.outcome(), MatchOutcome::Win);
        assert_eq!(record.players().len(), 2);

        let roster = data.roster("teamA").unwrap();
        assert_eq!(roster.games_played(), 1);
        assert_eq!(roster.wins(), 1);
        assert_eq!(roster.losses(), 0);
        assert_eq!(roster.rounds_played(), 20);

        for username in ["ace", "bolt"] {
            let player = data.player(username).unwrap();
            assert_eq!(player.games_played(), 1);
            assert_eq!(player.wins(), 1);
        }
    }

    #[test]
    fn record_match_tie_counts_only_games() {
        let mut data = team_a();
        data.record_match("teamA", 15, 15, "mapY").unwrap();

        let roster = data.roster("teamA").unwrap();
        assert_eq!(roster.games_played(), 1);
        assert_eq!((roster.wins(), roster.losses()), (0, 0));
        assert_eq!(roster.ties(), 1);
        assert_eq!(data.player("ace").unwrap().ties(), 1);
    }

    #[test]
    fn record_match_unknown_or_empty_roster() {
        let mut data = team_a();
        data.add_roster(Roster::new("empty")).unwrap();
        let before = data.clone();

        assert_eq!(
            data.record_match("ghosts", 1, 0, "m").unwrap_err(),
            StateError::not_found(Collection::Rosters, "ghosts")
        );
        assert_eq!(
            data.record_match("empty", 1, 0, "m").unwrap_err(),
            StateError::EmptyRoster {
                roster: "empty".into()
            }
        );
        assert_eq!(data, before);
    }

    #[test]
    fn record_match_is_all_or_nothing() {
        // Second member cannot take another loss.
        let mut data = AppData::from_parts(
            vec![
                Player::new("ace"),
                Player::restore("bolt", u32::MAX, 0, u32::MAX, 0),
            ],
            vec![Roster::new("teamA").with_players(["ace", "bolt"])],
            vec![],
        )
        .unwrap();
        let before = data.clone();

        let err = data.record_match("teamA", 3, 13, "mapX").unwrap_err();
        assert!(matches!(err, StateError::CounterOverflow { .. }));
        assert_eq!(data, before);
        assert_eq!(data.player("ace").unwrap().games_played(), 0);
        assert_eq!(data.matches().len(), 0);
        assert_eq!(data.next_match_id(), Some(MatchId::FIRST));
    }

    #[test]
    fn mvp_must_be_a_member() {
        let mut data = team_a();
        data.add_player(Player::new("outsider")).unwrap();

        let err = data
            .record(MatchReport::new("teamA", 13, 2, "mapX").with_mvp("outsider"))
            .unwrap_err();
        assert_eq!(err, StateError::not_found(Collection::RosterMembers, "outsider"));

        let record = data
            .record(MatchReport::new("teamA", 13, 2, "mapX").with_mvp("bolt"))
            .unwrap();
        assert_eq!(record.mvp(), Some("bolt"));
        assert_eq!(data.player("bolt").unwrap().mvp_awards(), 1);
        assert_eq!(data.player("ace").unwrap().mvp_awards(), 0);
    }

    #[test]
    fn match_ids_are_sequential() {
        let mut data = team_a();
        let first = data.record_match("teamA", 1, 0, "a").unwrap().id();
        let second = data.record_match("teamA", 0, 1, "b").unwrap().id();
        assert_eq!((first, second), (MatchId(1), MatchId(2)));
        assert_eq!(data.next_match_id(), Some(MatchId(3)));
        assert_eq!(data.match_by_id(MatchId(2)).unwrap().map(), "b");
    }

    #[test]
    fn removing_player_keeps_history() {
        let mut data = team_a();
        data.record_match("teamA", 13, 7, "mapX").unwrap();
        let snapshot = data.match_by_id(MatchId(1)).unwrap().clone();

        let removed = data.remove_player("ace").unwrap();
        assert_eq!(removed.games_played(), 1);
        assert_eq!(data.roster("teamA").unwrap().players(), ["bolt".to_string()]);
        assert_eq!(data.roster("teamA").unwrap().games_played(), 1);
        assert_eq!(data.match_by_id(MatchId(1)).unwrap(), &snapshot);
        assert_eq!(snapshot.players()[0].username(), "ace");
    }

    #[test]
    fn snapshot_is_frozen_against_later_edits() {
        let mut data = team_a();
        data.record_match("teamA", 13, 7, "mapX").unwrap();
        data.unassign_player("teamA", "bolt").unwrap();
        data.record_match("teamA", 2, 13, "mapY").unwrap();

        let first = data.match_by_id(MatchId(1)).unwrap();
        assert_eq!(first.players().len(), 2);
        assert_eq!(first.players()[0].games_played(), 1);
        assert_eq!(first.players()[0].losses(), 0);

        let second = data.match_by_id(MatchId(2)).unwrap();
        assert_eq!(second.players().len(), 1);
        assert_eq!(data.player("bolt").unwrap().games_played(), 1);
        assert_eq!(data.player("ace").unwrap().games_played(), 2);
    }

    #[test]
    fn assign_and_unassign() {
        let mut data = team_a();
        data.add_player(Player::new("cid")).unwrap();

        data.assign_player("teamA", "cid").unwrap();
        assert_eq!(
            data.assign_player("teamA", "cid").unwrap_err(),
            StateError::duplicate(Collection::RosterMembers, "cid")
        );
        assert_eq!(
            data.assign_player("teamA", "ghost").unwrap_err(),
            StateError::not_found(Collection::Players, "ghost")
        );

        let names: Vec<_> = data
            .roster_players("teamA")
            .unwrap()
            .into_iter()
            .map(Player::username)
            .collect();
        assert_eq!(names, ["ace", "bolt", "cid"]);

        data.unassign_player("teamA", "ace").unwrap();
        assert_eq!(
            data.unassign_player("teamA", "ace").unwrap_err(),
            StateError::not_found(Collection::RosterMembers, "ace")
        );
        assert!(data.player("ace").is_some());
    }

    #[test]
    fn collections_keep_insertion_order() {
        let mut data = AppData::new();
        for name in ["zed", "amy", "mo"] {
            data.add_player(Player::new(name)).unwrap();
        }
        data.remove_player("amy").unwrap();
        data.add_player(Player::new("amy")).unwrap();

        let names: Vec<_> = data.players().map(Player::username).collect();
        assert_eq!(names, ["zed", "mo", "amy"]);
    }

    #[test]
    fn records_never_break_counter_invariants() {
        let mut data = team_a();
        let rounds = [(13, 7), (7, 13), (10, 10), (16, 14), (0, 13), (12, 12)];
        for (won, lost) in rounds {
            data.record_match("teamA", won, lost, "mapX").unwrap();
            assert!(data.validate().is_ok());
        }

        let roster = data.roster("teamA").unwrap();
        assert_eq!(roster.games_played(), 6);
        assert_eq!((roster.wins(), roster.losses(), roster.ties()), (2, 2, 2));
        assert_eq!(data.matches_for_roster("teamA").count(), 6);
    }
}
