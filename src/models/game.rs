//! Throw and Game: one resolved round of rock/paper/scissors.

use crate::models::choice::{resolve, Choice, Side};
use crate::models::player::Player;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One thrown choice with the learner bookkeeping captured at throw time.
/// `reward` and `state` are populated only by learning players.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Throw {
    pub choice: Choice,
    pub label: String,
    pub reward: Option<f64>,
    pub state: Option<usize>,
}

impl Throw {
    /// A plain throw with no learner bookkeeping.
    pub fn plain(choice: Choice) -> Self {
        Throw {
            choice,
            label: choice.label().to_string(),
            reward: None,
            state: None,
        }
    }
}

/// A single game within a match, created and resolved atomically and never
/// mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// 1-based position of this game within its match.
    pub sequence: u32,
    pub player_one: String,
    pub player_two: String,
    pub throw_one: Throw,
    pub throw_two: Throw,
    /// None on a tie.
    pub winner: Option<Side>,
    /// Outcome text, e.g. "Alice wins!" or "Tie Game!".
    pub summary: String,
}

impl Game {
    /// Both players throw against the match-local history, then the round is
    /// resolved.
    pub fn play(
        sequence: u32,
        one: &Player,
        two: &Player,
        history: &[Game],
        rng: &mut impl Rng,
    ) -> Self {
        let throw_one = one.throw(history, rng);
        let throw_two = two.throw(history, rng);
        let winner = resolve(throw_one.choice, throw_two.choice);
        let summary = match winner {
            Some(Side::One) => format!("{} wins!", one.name),
            Some(Side::Two) => format!("{} wins!", two.name),
            None => "Tie Game!".to_string(),
        };
        Game {
            sequence,
            player_one: one.name.clone(),
            player_two: two.name.clone(),
            throw_one,
            throw_two,
            winner,
            summary,
        }
    }

    /// Name of the winning player, if any.
    pub fn winner_name(&self) -> Option<&str> {
        match self.winner {
            Some(Side::One) => Some(&self.player_one),
            Some(Side::Two) => Some(&self.player_two),
            None => None,
        }
    }

    /// Which seat the named player occupied in this game.
    pub fn side_of(&self, name: &str) -> Option<Side> {
        if self.player_one == name {
            Some(Side::One)
        } else if self.player_two == name {
            Some(Side::Two)
        } else {
            None
        }
    }

    pub fn throw_for(&self, side: Side) -> &Throw {
        match side {
            Side::One => &self.throw_one,
            Side::Two => &self.throw_two,
        }
    }

    /// The (opponent_choice, own_choice) pair this game contributes to the
    /// named player's state encoding; None if the player was not in the game.
    pub fn pair_for(&self, name: &str) -> Option<(Choice, Choice)> {
        let side = self.side_of(name)?;
        let own = self.throw_for(side).choice;
        let opponent = self.throw_for(side.other()).choice;
        Some((opponent, own))
    }
}
