//! Data structures for the tournament: choices, games, players, brackets.

mod bracket;
mod choice;
mod game;
mod player;
mod tourney;

pub use bracket::{Bracket, BracketNode};
pub use choice::{resolve, Choice, Side};
pub use game::{Game, Throw};
pub use player::{Player, Strategy};
pub use tourney::{
    MatchRecord, Tourney, TourneyError, TourneyId, TourneyState, DEFAULT_WINS_REQUIRED,
};
