//! History-to-state encoding: closed-form positional base-9 index.
//!
//! A remembered game contributes one (opponent_choice, own_choice) pair, i.e.
//! one base-9 digit. A window of `n` pairs selects a state inside level `n`;
//! levels are laid out shallowest-first, so the offset of level `n` is the
//! cumulative state count of levels `0..n`.

use crate::models::Choice;

/// Total number of states for a lookback of `depth` games:
/// sum of 9^k for k in 0..=depth (the k=0 term is the single root state).
pub fn state_count(depth: usize) -> usize {
    (0..=depth as u32).map(|k| 9usize.pow(k)).sum()
}

/// First state index of the level reached through `window_len` remembered
/// games. Level 0 (empty history) starts at 0.
pub fn level_offset(window_len: usize) -> usize {
    (0..window_len as u32).map(|k| 9usize.pow(k)).sum()
}

/// Encode an ordered window of (opponent_choice, own_choice) pairs, oldest
/// first, into a state index. The caller is responsible for truncating the
/// window to the lookback depth. An empty window is the root state 0.
pub fn encode(window: &[(Choice, Choice)]) -> usize {
    let mut index = 0;
    for &(opponent, own) in window {
        index = index * 9 + opponent.index() * 3 + own.index();
    }
    level_offset(window.len()) + index
}
