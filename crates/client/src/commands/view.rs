//! Read-only commands.

use anyhow::Result;
use clap::Parser;
use console::style;
use stats_core::AppData;

use super::format_rate;

/// Show every player's record
#[derive(Parser)]
pub struct Players {}

impl Players {
    pub fn execute(self, data: &AppData) -> Result<bool> {
        if data.players().len() == 0 {
            println!("{}", style("No players yet.").dim());
            return Ok(false);
        }

        println!(
            "{}",
            style(format!(
                "{:<20} {:>6} {:>6} {:>6} {:>6} {:>6} {:>8}",
                "Player", "Games", "Won", "Lost", "Tied", "MVPs", "Win %"
            ))
            .bold()
        );
        for player in data.players() {
            println!(
                "{:<20} {:>6} {:>6} {:>6} {:>6} {:>6} {:>8}",
                player.username(),
                player.games_played(),
                player.wins(),
                player.losses(),
                player.ties(),
                player.mvp_awards(),
                format_rate(player.win_rate()),
            );
        }
        Ok(false)
    }
}

/// Show every roster with win rate and members
#[derive(Parser)]
pub struct Rosters {}

impl Rosters {
    pub fn execute(self, data: &AppData) -> Result<bool> {
        if data.rosters().len() == 0 {
            println!("{}", style("No rosters yet.").dim());
            return Ok(false);
        }

        println!(
            "{}",
            style(format!(
                "{:<16} {:>6} {:>6} {:>6} {:>6} {:>7} {:>8}  {}",
                "Roster", "Games", "Won", "Lost", "Tied", "Rounds", "Win %", "Players"
            ))
            .bold()
        );
        for roster in data.rosters() {
            println!(
                "{:<16} {:>6} {:>6} {:>6} {:>6} {:>7} {:>8}  {}",
                roster.id(),
                roster.games_played(),
                roster.wins(),
                roster.losses(),
                roster.ties(),
                roster.rounds_played(),
                format_rate(roster.win_rate()),
                roster.players().join(", "),
            );
        }
        Ok(false)
    }
}

/// Show recorded matches
#[derive(Parser)]
pub struct Matches {
    /// Only show matches recorded for this roster
    #[arg(short, long, value_name = "ROSTER")]
    roster: Option<String>,
}

impl Matches {
    pub fn execute(self, data: &AppData) -> Result<bool> {
        let matches: Vec<_> = match self.roster.as_deref() {
            Some(roster) => data.matches_for_roster(roster).collect(),
            None => data.matches().collect(),
        };
        if matches.is_empty() {
            println!("{}", style("No matches recorded.").dim());
            return Ok(false);
        }

        println!(
            "{}",
            style(format!(
                "{:<6} {:<16} {:<14} {:>7} {:>6}  {:<6} {}",
                "Match", "Roster", "Map", "Score", "Rounds", "Result", "Players"
            ))
            .bold()
        );
        for record in matches {
            let players: Vec<String> = record
                .players()
                .iter()
                .map(|player| match record.mvp() {
                    Some(mvp) if mvp == player.username() => format!("{}*", player.username()),
                    _ => player.username().to_string(),
                })
                .collect();
            println!(
                "{:<6} {:<16} {:<14} {:>7} {:>6}  {:<6} {}",
                record.id().to_string(),
                record.roster_id(),
                record.map(),
                format!("{}-{}", record.rounds_won(), record.rounds_lost()),
                record.total_rounds(),
                record.outcome().to_string(),
                players.join(", "),
            );
        }
        Ok(false)
    }
}

/// Validate the stored data and compare counters with match history
#[derive(Parser)]
pub struct Check {}

impl Check {
    pub fn execute(self, data: &AppData) -> Result<bool> {
        data.validate()?;

        let divergences = data.history_divergences();
        if divergences.is_empty() {
            println!(
                "{} {} players, {} rosters, {} matches",
                style("✓ consistent:").green(),
                data.players().len(),
                data.rosters().len(),
                data.matches().len()
            );
        } else {
            for divergence in divergences {
                println!(
                    "{} roster '{}' stores {}={} but its matches add up to {}",
                    style("!").yellow(),
                    divergence.roster,
                    divergence.field,
                    divergence.stored,
                    divergence.from_history
                );
            }
        }
        Ok(false)
    }
}
