//! Entity types owned by [`crate::AppData`].

mod matches;
mod player;
mod roster;

pub use matches::{Match, MatchId, MatchOutcome, MatchReport};
pub use player::Player;
pub use roster::Roster;

/// `part / whole * 100`, or `None` when `whole` is zero.
fn percentage(part: u32, whole: u32) -> Option<f64> {
    (whole > 0).then(|| f64::from(part) / f64::from(whole) * 100.0)
}
