//! Player: one contestant, either a uniform-random chooser or a learning
//! agent. One polymorphic `throw` capability; `learn` is a no-op for the
//! random variant.

use crate::learning::{Learner, LearnerConfig};
use crate::models::choice::Choice;
use crate::models::game::{Game, Throw};
use rand::Rng;
use std::path::Path;

/// How a player picks its throws.
#[derive(Clone, Debug)]
pub enum Strategy {
    /// Uniform over the three choices; history ignored.
    Random,
    /// Tabular Q-learning over recent match history.
    Learning(Learner),
}

/// A contestant in the tournament. `wins` is the game-win counter of the
/// match currently in flight (reset by the match driver); `losses` counts
/// matches lost across the tournament.
#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub strategy: Strategy,
}

impl Player {
    /// A uniformly-random chooser.
    pub fn random(name: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            wins: 0,
            losses: 0,
            strategy: Strategy::Random,
        }
    }

    /// A learning agent with a freshly-initialized Q-table.
    pub fn learning(name: impl Into<String>, config: LearnerConfig) -> Self {
        Player {
            name: name.into(),
            wins: 0,
            losses: 0,
            strategy: Strategy::Learning(Learner::new(config)),
        }
    }

    /// The learner, if this player is a learning agent.
    pub fn learner(&self) -> Option<&Learner> {
        match &self.strategy {
            Strategy::Learning(learner) => Some(learner),
            Strategy::Random => None,
        }
    }

    /// Produce a throw given the match-local history. Learning players encode
    /// the history into a state and select epsilon-greedily, recording the
    /// state and the Q-value of the chosen cell on the throw.
    pub fn throw(&self, history: &[Game], rng: &mut impl Rng) -> Throw {
        match &self.strategy {
            Strategy::Random => {
                Throw::plain(Choice::from_index(rng.gen_range(0..Choice::ALL.len())))
            }
            Strategy::Learning(learner) => {
                let window = self.history_pairs(history);
                let state = learner.state_for(&window);
                let (choice, reward) = learner.choose(state, rng);
                Throw {
                    choice,
                    label: choice.label().to_string(),
                    reward: Some(reward),
                    state: Some(state),
                }
            }
        }
    }

    /// TD(0) update for a completed game of this player's current match.
    /// `history` is the match-local game list as it was before `game` was
    /// played. No-op for random players and for games this player was not in.
    pub fn learn(&mut self, history: &[Game], game: &Game) {
        let Player { name, strategy, .. } = self;
        let Strategy::Learning(learner) = strategy else {
            return;
        };
        let Some(side) = game.side_of(name) else {
            return;
        };
        let own = game.throw_for(side);
        let (Some(cur_state), Some(immediate_reward)) = (own.state, own.reward) else {
            return;
        };
        let mut window: Vec<(Choice, Choice)> = history
            .iter()
            .chain(std::iter::once(game))
            .filter_map(|g| g.pair_for(name))
            .collect();
        let keep = window.len().min(learner.config().history_depth);
        window.drain(..window.len() - keep);
        let next_state = learner.state_for(&window);
        learner.update(cur_state, own.choice, immediate_reward, next_state);
    }

    /// Persist this player's Q-table; false for random players or on I/O
    /// failure.
    pub fn save_q_table(&self, path: impl AsRef<Path>) -> bool {
        match &self.strategy {
            Strategy::Learning(learner) => learner.save_q_table(path),
            Strategy::Random => false,
        }
    }

    /// Load a persisted Q-table into this player per the prefix-merge policy;
    /// false for random players or on a missing/malformed file.
    pub fn load_q_table(&mut self, path: impl AsRef<Path>) -> bool {
        match &mut self.strategy {
            Strategy::Learning(learner) => learner.load_q_table(path),
            Strategy::Random => false,
        }
    }

    /// Record a match loss.
    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    /// (opponent, own) pairs from this player's perspective, oldest first.
    fn history_pairs(&self, history: &[Game]) -> Vec<(Choice, Choice)> {
        history.iter().filter_map(|g| g.pair_for(&self.name)).collect()
    }
}
