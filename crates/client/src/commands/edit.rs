//! Commands that change the aggregate. Each returns `true` so the caller saves.

use anyhow::Result;
use clap::Parser;
use console::style;
use stats_core::{AppData, MatchReport, Player, Roster};

/// Add a player with an empty record
#[derive(Parser)]
pub struct AddPlayer {
    #[arg(value_name = "USERNAME")]
    username: String,
}

impl AddPlayer {
    pub fn execute(self, data: &mut AppData) -> Result<bool> {
        let player = data.add_player(Player::new(self.username))?;
        println!("{} player '{}'", style("Added").green(), player.username());
        Ok(true)
    }
}

/// Remove a player from the tracker and from every roster
#[derive(Parser)]
pub struct RemovePlayer {
    #[arg(value_name = "USERNAME")]
    username: String,
}

impl RemovePlayer {
    pub fn execute(self, data: &mut AppData) -> Result<bool> {
        let player = data.remove_player(&self.username)?;
        println!(
            "{} player '{}' ({} games kept in match history)",
            style("Removed").yellow(),
            player.username(),
            player.games_played()
        );
        Ok(true)
    }
}

/// Add a roster, optionally with initial members
#[derive(Parser)]
pub struct AddRoster {
    #[arg(value_name = "ID")]
    id: String,

    /// Usernames of existing players to put on the roster
    #[arg(value_name = "PLAYERS")]
    players: Vec<String>,
}

impl AddRoster {
    pub fn execute(self, data: &mut AppData) -> Result<bool> {
        let roster = data.add_roster(Roster::new(self.id).with_players(self.players))?;
        println!(
            "{} roster '{}' with {} players",
            style("Added").green(),
            roster.id(),
            roster.players().len()
        );
        Ok(true)
    }
}

/// Remove a roster; its matches are kept
#[derive(Parser)]
pub struct RemoveRoster {
    #[arg(value_name = "ID")]
    id: String,
}

impl RemoveRoster {
    pub fn execute(self, data: &mut AppData) -> Result<bool> {
        let roster = data.remove_roster(&self.id)?;
        println!("{} roster '{}'", style("Removed").yellow(), roster.id());
        Ok(true)
    }
}

/// Add a player to a roster
#[derive(Parser)]
pub struct Assign {
    #[arg(value_name = "ROSTER")]
    roster: String,

    #[arg(value_name = "USERNAME")]
    username: String,
}

impl Assign {
    pub fn execute(self, data: &mut AppData) -> Result<bool> {
        data.assign_player(&self.roster, &self.username)?;
        println!(
            "{} '{}' to roster '{}'",
            style("Assigned").green(),
            self.username,
            self.roster
        );
        Ok(true)
    }
}

/// Take a player off a roster
#[derive(Parser)]
pub struct Unassign {
    #[arg(value_name = "ROSTER")]
    roster: String,

    #[arg(value_name = "USERNAME")]
    username: String,
}

impl Unassign {
    pub fn execute(self, data: &mut AppData) -> Result<bool> {
        data.unassign_player(&self.roster, &self.username)?;
        println!(
            "{} '{}' from roster '{}'",
            style("Unassigned").yellow(),
            self.username,
            self.roster
        );
        Ok(true)
    }
}

/// Record a completed match for a roster
#[derive(Parser)]
pub struct Record {
    #[arg(value_name = "ROSTER")]
    roster: String,

    /// Rounds the roster won
    #[arg(value_name = "WON")]
    won: u32,

    /// Rounds the roster lost
    #[arg(value_name = "LOST")]
    lost: u32,

    #[arg(value_name = "MAP")]
    map: String,

    /// Roster member who earned the MVP award
    #[arg(long, value_name = "USERNAME")]
    mvp: Option<String>,
}

impl Record {
    pub fn execute(self, data: &mut AppData) -> Result<bool> {
        let mut report = MatchReport::new(self.roster, self.won, self.lost, self.map);
        if let Some(mvp) = self.mvp {
            report = report.with_mvp(mvp);
        }

        let record = data.record(report)?;
        tracing::info!(
            "Recorded match {} for roster '{}' ({})",
            record.id(),
            record.roster_id(),
            record.outcome()
        );
        println!(
            "{} match {}: {} {}-{} on {}",
            style("Recorded").green(),
            record.id(),
            record.outcome(),
            record.rounds_won(),
            record.rounds_lost(),
            record.map()
        );
        Ok(true)
    }
}
