//! Tournament driving logic: match play and bracket traversal.

mod brackets;
mod match_play;

pub use brackets::{run_championship, run_lower_bracket, run_tourney, run_upper_bracket};
pub use match_play::{play_match, MatchOutcome};
