//! JSON document codec for the tracker aggregate.
//!
//! # Document Format
//!
//! ```text
//! {
//!   "players": [ { "username", "games_played", "wins", "losses",
//!                  "most_valuable_player_awards" } ],
//!   "rosters": [ { "id", "players": [username], "games_played",
//!                  "rounds_played", "wins", "losses" } ],
//!   "matches": [ { "match_id", "roster_id", "players": [player object],
//!                  "rounds_won", "rounds_lost", "map", "mvp" } ]
//! }
//! ```
//!
//! Rosters reference players by username; matches embed full player copies.
//! Counters are parsed as signed integers so that a negative value is reported
//! as an inconsistency rather than a parse failure. Unknown fields are
//! rejected.

use serde::{Deserialize, Serialize};
use stats_core::{AppData, ConsistencyError, Match, MatchId, Player, Roster};

use super::{RepositoryError, Result};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StoreDocument {
    players: Vec<PlayerRecord>,
    rosters: Vec<RosterRecord>,
    matches: Vec<MatchRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlayerRecord {
    username: String,
    games_played: i64,
    wins: i64,
    losses: i64,
    most_valuable_player_awards: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RosterRecord {
    id: String,
    players: Vec<String>,
    games_played: i64,
    rounds_played: i64,
    wins: i64,
    losses: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatchRecord {
    match_id: MatchId,
    roster_id: String,
    players: Vec<PlayerRecord>,
    rounds_won: i64,
    rounds_lost: i64,
    map: String,
    #[serde(default)]
    mvp: Option<String>,
}

impl From<&Player> for PlayerRecord {
    fn from(player: &Player) -> Self {
        Self {
            username: player.username().to_owned(),
            games_played: player.games_played().into(),
            wins: player.wins().into(),
            losses: player.losses().into(),
            most_valuable_player_awards: player.mvp_awards().into(),
        }
    }
}

impl From<&Roster> for RosterRecord {
    fn from(roster: &Roster) -> Self {
        Self {
            id: roster.id().to_owned(),
            players: roster.players().to_vec(),
            games_played: roster.games_played().into(),
            rounds_played: roster.rounds_played().into(),
            wins: roster.wins().into(),
            losses: roster.losses().into(),
        }
    }
}

impl From<&Match> for MatchRecord {
    fn from(record: &Match) -> Self {
        Self {
            match_id: record.id(),
            roster_id: record.roster_id().to_owned(),
            players: record.players().iter().map(PlayerRecord::from).collect(),
            rounds_won: record.rounds_won().into(),
            rounds_lost: record.rounds_lost().into(),
            map: record.map().to_owned(),
            mvp: record.mvp().map(str::to_owned),
        }
    }
}

impl PlayerRecord {
    fn into_player(self) -> Result<Player> {
        let entity = format!("player '{}'", self.username);
        Ok(Player::restore(
            self.username,
            counter(self.games_played, &entity, "games_played")?,
            counter(self.wins, &entity, "wins")?,
            counter(self.losses, &entity, "losses")?,
            counter(
                self.most_valuable_player_awards,
                &entity,
                "most_valuable_player_awards",
            )?,
        ))
    }
}

impl RosterRecord {
    fn into_roster(self) -> Result<Roster> {
        let entity = format!("roster '{}'", self.id);
        Ok(Roster::restore(
            self.id,
            self.players,
            counter(self.games_played, &entity, "games_played")?,
            counter(self.rounds_played, &entity, "rounds_played")?,
            counter(self.wins, &entity, "wins")?,
            counter(self.losses, &entity, "losses")?,
        ))
    }
}

impl MatchRecord {
    fn into_match(self) -> Result<Match> {
        let entity = format!("match {}", self.match_id);
        let rounds_won = counter(self.rounds_won, &entity, "rounds_won")?;
        let rounds_lost = counter(self.rounds_lost, &entity, "rounds_lost")?;
        let players = self
            .players
            .into_iter()
            .map(PlayerRecord::into_player)
            .collect::<Result<Vec<_>>>()?;

        Ok(Match::restore(
            self.match_id,
            self.roster_id,
            players,
            rounds_won,
            rounds_lost,
            self.map,
            self.mvp,
        ))
    }
}

/// Narrows a stored counter, reporting negatives as inconsistencies.
fn counter(value: i64, entity: &str, field: &'static str) -> Result<u32> {
    if value < 0 {
        return Err(ConsistencyError::NegativeCounter {
            entity: entity.to_owned(),
            field,
            value,
        }
        .into());
    }
    u32::try_from(value).map_err(|_| {
        RepositoryError::Format(format!("{field} of {entity} is out of range ({value})"))
    })
}

/// Serializes the whole aggregate, in collection order.
///
/// The output depends only on `data`, so encoding an unchanged aggregate
/// twice yields identical bytes.
pub fn encode(data: &AppData) -> Result<String> {
    let document = StoreDocument {
        players: data.players().map(PlayerRecord::from).collect(),
        rosters: data.rosters().map(RosterRecord::from).collect(),
        matches: data.matches().map(MatchRecord::from).collect(),
    };
    serde_json::to_string_pretty(&document).map_err(|e| RepositoryError::Json(e.to_string()))
}

/// Parses and validates a document.
///
/// # Errors
///
/// - [`RepositoryError::Format`] for invalid JSON, wrong types, missing or unknown fields
/// - [`RepositoryError::Consistency`] for negative counters, duplicate keys,
///   dangling roster members, or any other invariant violation
pub fn decode(text: &str) -> Result<AppData> {
    let document: StoreDocument =
        serde_json::from_str(text).map_err(|e| RepositoryError::Format(e.to_string()))?;

    let players = document
        .players
        .into_iter()
        .map(PlayerRecord::into_player)
        .collect::<Result<Vec<_>>>()?;
    let rosters = document
        .rosters
        .into_iter()
        .map(RosterRecord::into_roster)
        .collect::<Result<Vec<_>>>()?;
    let matches = document
        .matches
        .into_iter()
        .map(MatchRecord::into_match)
        .collect::<Result<Vec<_>>>()?;

    let data = AppData::from_parts(players, rosters, matches)?;

    for divergence in data.history_divergences() {
        tracing::warn!(
            "Roster '{}' stores {}={} but its recorded matches add up to {}",
            divergence.roster,
            divergence.field,
            divergence.stored,
            divergence.from_history
        );
    }

    Ok(data)
}
