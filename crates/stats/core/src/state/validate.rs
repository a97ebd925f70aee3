//! Invariant checks for aggregates assembled from stored parts.

use indexmap::IndexMap;

use super::{AppData, ConsistencyError, Match, MatchId, Player, Roster};

/// A roster whose stored counters are lower than what its recorded matches add up to.
///
/// Rosters keep their own counters and are not re-derived from history, so
/// this can only come from a hand-edited store or a lost update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryDivergence {
    pub roster: String,
    pub field: &'static str,
    pub stored: u64,
    pub from_history: u64,
}

impl AppData {
    /// Assembles an aggregate from stored parts, rejecting anything that
    /// breaks the data model.
    ///
    /// Parts keep the order they are given in. The next match id continues
    /// after the highest stored id.
    pub fn from_parts(
        players: Vec<Player>,
        rosters: Vec<Roster>,
        matches: Vec<Match>,
    ) -> Result<Self, ConsistencyError> {
        let mut data = AppData::new();

        for player in players {
            player.validate()?;
            if data.players.contains_key(player.username()) {
                return Err(ConsistencyError::DuplicatePlayer {
                    username: player.username().to_owned(),
                });
            }
            data.players.insert(player.username().to_owned(), player);
        }

        for roster in rosters {
            data.check_roster(&roster)?;
            if data.rosters.contains_key(roster.id()) {
                return Err(ConsistencyError::DuplicateRoster {
                    id: roster.id().to_owned(),
                });
            }
            data.rosters.insert(roster.id().to_owned(), roster);
        }

        let mut highest: Option<MatchId> = None;
        for record in matches {
            check_match(&record)?;
            if data.matches.contains_key(&record.id()) {
                return Err(ConsistencyError::DuplicateMatch { id: record.id() });
            }
            highest = highest.max(Some(record.id()));
            data.matches.insert(record.id(), record);
        }
        data.next_match_id = match highest {
            Some(id) => id.next(),
            None => Some(MatchId::FIRST),
        };

        Ok(data)
    }

    /// Re-checks every invariant of the current aggregate.
    pub fn validate(&self) -> Result<(), ConsistencyError> {
        for player in self.players.values() {
            player.validate()?;
        }
        for roster in self.rosters.values() {
            self.check_roster(roster)?;
        }
        for record in self.matches.values() {
            check_match(record)?;
        }
        Ok(())
    }

    /// Compares each roster's counters with the matches attributed to it.
    pub fn history_divergences(&self) -> Vec<HistoryDivergence> {
        #[derive(Default)]
        struct Tally {
            games: u64,
            rounds: u64,
            wins: u64,
            losses: u64,
        }

        let mut tallies: IndexMap<&str, Tally> = IndexMap::new();
        for record in self.matches.values() {
            let tally = tallies.entry(record.roster_id()).or_default();
            tally.games += 1;
            tally.rounds += record.total_rounds();
            match record.outcome() {
                super::MatchOutcome::Win => tally.wins += 1,
                super::MatchOutcome::Loss => tally.losses += 1,
                super::MatchOutcome::Tie => {}
            }
        }

        let mut divergences = Vec::new();
        for roster in self.rosters.values() {
            let Some(tally) = tallies.get(roster.id()) else {
                continue;
            };
            let fields = [
                ("games_played", roster.games_played(), tally.games),
                ("rounds_played", roster.rounds_played(), tally.rounds),
                ("wins", roster.wins(), tally.wins),
                ("losses", roster.losses(), tally.losses),
            ];
            for (field, stored, from_history) in fields {
                if u64::from(stored) < from_history {
                    divergences.push(HistoryDivergence {
                        roster: roster.id().to_owned(),
                        field,
                        stored: u64::from(stored),
                        from_history,
                    });
                }
            }
        }
        divergences
    }

    fn check_roster(&self, roster: &Roster) -> Result<(), ConsistencyError> {
        roster.validate()?;
        match roster
            .players()
            .iter()
            .find(|username| !self.players.contains_key(username.as_str()))
        {
            Some(username) => Err(ConsistencyError::UnknownMember {
                roster: roster.id().to_owned(),
                username: username.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn check_match(record: &Match) -> Result<(), ConsistencyError> {
    if record.players().is_empty() {
        return Err(ConsistencyError::EmptySnapshot { id: record.id() });
    }
    for player in record.players() {
        player.validate()?;
    }
    if let Some(mvp) = record.mvp()
        && !record.players().iter().any(|player| player.username() == mvp)
    {
        return Err(ConsistencyError::UnknownMvp {
            id: record.id(),
            username: mvp.to_owned(),
        });
    }
    Ok(())
}
