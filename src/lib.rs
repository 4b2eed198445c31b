//! Double-elimination rock/paper/scissors tournament library with a tabular
//! Q-learning contestant.

pub mod learning;
pub mod logic;
pub mod models;

pub use learning::{Learner, LearnerConfig};
pub use logic::{
    play_match, run_championship, run_lower_bracket, run_tourney, run_upper_bracket, MatchOutcome,
};
pub use models::{
    resolve, Bracket, BracketNode, Choice, Game, MatchRecord, Player, Side, Strategy, Throw,
    Tourney, TourneyError, TourneyId, TourneyState, DEFAULT_WINS_REQUIRED,
};
