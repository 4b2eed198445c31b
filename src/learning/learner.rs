//! The tabular learning engine: epsilon-greedy selection and TD(0) updates
//! over the outcome-seeded Q-table.

use crate::learning::encoding;
use crate::learning::qtable::QTable;
use crate::models::Choice;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for a learning contestant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    /// Step size of the TD update, in (0, 1).
    pub learning_rate: f64,
    /// Weight of the optimal future reward, in [0, 1].
    pub discount: f64,
    /// Probability of throwing uniformly at random instead of greedily,
    /// in [0, 1].
    pub exploration: f64,
    /// How many completed games of the current match are remembered when
    /// encoding the state.
    pub history_depth: usize,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount: 0.8,
            exploration: 0.1,
            history_depth: 3,
        }
    }
}

/// State encoder + Q-table + selection/update policy for one player.
#[derive(Clone, Debug)]
pub struct Learner {
    config: LearnerConfig,
    table: QTable,
}

impl Learner {
    pub fn new(config: LearnerConfig) -> Self {
        let table = QTable::new(config.history_depth);
        Learner { config, table }
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    /// State count for the configured depth (the live table can hold more
    /// rows after loading a larger one).
    pub fn num_states(&self) -> usize {
        encoding::state_count(self.config.history_depth)
    }

    /// Read-only view of the raw Q-table rows.
    pub fn q_table(&self) -> &[[f64; 3]] {
        self.table.rows()
    }

    /// Encode a window of (opponent_choice, own_choice) pairs into a state,
    /// truncating to the most recent `history_depth` games.
    pub fn state_for(&self, window: &[(Choice, Choice)]) -> usize {
        let keep = window.len().min(self.config.history_depth);
        encoding::encode(&window[window.len() - keep..])
    }

    /// Epsilon-greedy selection at `state`: greedy with probability
    /// `1 - exploration` (ties broken in enumeration order), otherwise
    /// uniform. Also returns the table's current value at the chosen cell.
    pub fn choose(&self, state: usize, rng: &mut impl Rng) -> (Choice, f64) {
        let choice = if rng.gen::<f64>() > self.config.exploration {
            self.table.argmax(state)
        } else {
            Choice::from_index(rng.gen_range(0..Choice::ALL.len()))
        };
        (choice, self.table.value(state, choice))
    }

    /// TD(0) update for the throw recorded at `(state, choice)` with the
    /// reward captured at throw time, given the state reached afterwards.
    pub fn update(&mut self, state: usize, choice: Choice, immediate_reward: f64, next_state: usize) {
        let optimal_future = self.table.max_value(next_state);
        let learned = immediate_reward + self.config.discount * optimal_future;
        let current = self.table.value(state, choice);
        let blended = (1.0 - self.config.learning_rate) * current + self.config.learning_rate * learned;
        self.table.set(state, choice, blended);
    }

    /// Persist the Q-table; false on failure, in-memory state unaffected.
    pub fn save_q_table(&self, path: impl AsRef<Path>) -> bool {
        self.table.save(path)
    }

    /// Load and merge a persisted Q-table per the prefix policy; false on a
    /// missing or malformed file, leaving the freshly-initialized table.
    pub fn load_q_table(&mut self, path: impl AsRef<Path>) -> bool {
        self.table.load(path)
    }
}
