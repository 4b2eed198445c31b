//! Reinforcement-learning engine for the 3-choice cyclic-dominance game:
//! state encoding, Q-table, and the learner policy.

mod encoding;
mod learner;
mod qtable;

pub use encoding::{encode, level_offset, state_count};
pub use learner::{Learner, LearnerConfig};
pub use qtable::{QTable, LOSS_SEED, TIE_SEED, UNBIASED_SEED, WIN_SEED};
