//! Command implementations for the trackgo binary.
//!
//! Read-only commands print overview tables; mutating commands apply one
//! change to the loaded aggregate and save it.

mod edit;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use stats_runtime::Tracker;

pub use edit::{AddPlayer, AddRoster, Assign, Record, RemovePlayer, RemoveRoster, Unassign};
pub use view::{Check, Matches, Players, Rosters};

#[derive(Parser)]
pub enum Command {
    /// Show every player's record
    Players(Players),

    /// Show every roster with win rate and members
    Rosters(Rosters),

    /// Show recorded matches
    Matches(Matches),

    /// Add a player with an empty record
    AddPlayer(AddPlayer),

    /// Remove a player from the tracker and from every roster
    RemovePlayer(RemovePlayer),

    /// Add a roster, optionally with initial members
    AddRoster(AddRoster),

    /// Remove a roster; its matches are kept
    RemoveRoster(RemoveRoster),

    /// Add a player to a roster
    Assign(Assign),

    /// Take a player off a roster
    Unassign(Unassign),

    /// Record a completed match for a roster
    Record(Record),

    /// Validate the stored data and compare counters with match history
    Check(Check),
}

impl Command {
    pub fn execute(self, tracker: &mut Tracker) -> Result<()> {
        let mutated = match self {
            Command::Players(cmd) => cmd.execute(tracker.data()),
            Command::Rosters(cmd) => cmd.execute(tracker.data()),
            Command::Matches(cmd) => cmd.execute(tracker.data()),
            Command::Check(cmd) => cmd.execute(tracker.data()),
            Command::AddPlayer(cmd) => cmd.execute(tracker.data_mut()),
            Command::RemovePlayer(cmd) => cmd.execute(tracker.data_mut()),
            Command::AddRoster(cmd) => cmd.execute(tracker.data_mut()),
            Command::RemoveRoster(cmd) => cmd.execute(tracker.data_mut()),
            Command::Assign(cmd) => cmd.execute(tracker.data_mut()),
            Command::Unassign(cmd) => cmd.execute(tracker.data_mut()),
            Command::Record(cmd) => cmd.execute(tracker.data_mut()),
        }?;

        if mutated {
            tracker.save().with_context(|| {
                format!(
                    "An error occurred while saving data to {}",
                    tracker.location()
                )
            })?;
        }
        Ok(())
    }
}

/// Win rate as shown in tables.
fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{rate:.1}%"),
        None => "-".to_string(),
    }
}
