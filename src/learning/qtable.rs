//! The Q-table: a dense [num_states, 3] reward matrix with outcome-seeded
//! initialization and a prefix-merging binary persistence contract.

use crate::learning::encoding::{level_offset, state_count};
use crate::models::Choice;
use std::path::Path;

/// Unbiased value for cells with no remembered outcome (and all of state 0).
pub const UNBIASED_SEED: f64 = 1.0;
/// Seed when the most recent remembered game was a tie.
pub const TIE_SEED: f64 = 1.0;
/// Seed when the most recent remembered game was won.
pub const WIN_SEED: f64 = 3.0;
/// Seed when the most recent remembered game was lost.
pub const LOSS_SEED: f64 = -5.0;

/// Dense expected-reward matrix indexed by (state, choice).
#[derive(Clone, Debug, PartialEq)]
pub struct QTable {
    rows: Vec<[f64; 3]>,
}

impl QTable {
    /// Allocate and seed the table for the given lookback depth.
    ///
    /// Every row starts at the unbiased value. Each state at level >= 1 then
    /// gets the cell of its most recent remembered own-choice seeded by that
    /// game's outcome: tie -> 1, win -> 3, loss -> -5. Earlier games in the
    /// window never change the seed, so deeper levels repeat the level-1
    /// pattern.
    pub fn new(depth: usize) -> Self {
        let mut rows = vec![[UNBIASED_SEED; 3]; state_count(depth)];
        for level in 1..=depth {
            let offset = level_offset(level);
            for local in 0..9usize.pow(level as u32) {
                // The most recent pair is the least significant base-9 digit.
                let opponent = Choice::from_index((local % 9) / 3);
                let own = Choice::from_index(local % 3);
                rows[offset + local][own.index()] = seed_reward(opponent, own);
            }
        }
        QTable { rows }
    }

    /// Number of state rows currently held (>= the configured state count
    /// after loading a larger table).
    pub fn num_states(&self) -> usize {
        self.rows.len()
    }

    pub fn value(&self, state: usize, choice: Choice) -> f64 {
        self.rows[state][choice.index()]
    }

    /// Maximum value over the three choices at `state`.
    pub fn max_value(&self, state: usize) -> f64 {
        let row = &self.rows[state];
        row[0].max(row[1]).max(row[2])
    }

    /// The choice with the maximum value at `state`, ties broken by
    /// enumeration order (Rock, Paper, Scissors).
    pub fn argmax(&self, state: usize) -> Choice {
        let row = &self.rows[state];
        let mut best = Choice::Rock;
        for choice in Choice::ALL {
            if row[choice.index()] > row[best.index()] {
                best = choice;
            }
        }
        best
    }

    pub fn set(&mut self, state: usize, choice: Choice, value: f64) {
        self.rows[state][choice.index()] = value;
    }

    /// Read-only view of the raw matrix (for presentation collaborators).
    pub fn rows(&self) -> &[[f64; 3]] {
        &self.rows
    }

    /// Save the table as a binary blob. Returns false on any I/O or encoding
    /// failure; in-memory state is never affected.
    pub fn save(&self, path: impl AsRef<Path>) -> bool {
        let blob = match bincode::serialize(&self.rows) {
            Ok(blob) => blob,
            Err(_) => return false,
        };
        std::fs::write(path, blob).is_ok()
    }

    /// Load a table blob and merge it into this one. A table with at least as
    /// many rows fully replaces this one (extra rows are kept); a smaller
    /// table overwrites only the overlapping prefix, leaving deeper rows at
    /// their current values. Returns false on a missing or malformed file,
    /// leaving the table untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> bool {
        let blob = match std::fs::read(path) {
            Ok(blob) => blob,
            Err(_) => return false,
        };
        let loaded: Vec<[f64; 3]> = match bincode::deserialize(&blob) {
            Ok(rows) => rows,
            Err(_) => return false,
        };
        if loaded.len() >= self.rows.len() {
            self.rows = loaded;
        } else {
            self.rows[..loaded.len()].copy_from_slice(&loaded);
        }
        true
    }
}

/// Seed reward for a state whose most recent remembered game had this
/// (opponent, own) pair, from the owning player's perspective.
fn seed_reward(opponent: Choice, own: Choice) -> f64 {
    if own == opponent {
        TIE_SEED
    } else if own.beats() == opponent {
        WIN_SEED
    } else {
        LOSS_SEED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::encoding::encode;
    use crate::models::Choice::*;

    #[test]
    fn root_state_is_unbiased() {
        let table = QTable::new(3);
        assert_eq!(table.rows()[0], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn level_one_seeds_follow_the_outcome() {
        let table = QTable::new(1);
        // Paper beats Rock: win seed in the Paper column.
        assert_eq!(table.value(encode(&[(Rock, Paper)]), Paper), WIN_SEED);
        // Scissors loses to Rock.
        assert_eq!(table.value(encode(&[(Rock, Scissors)]), Scissors), LOSS_SEED);
        // Tie.
        assert_eq!(table.value(encode(&[(Rock, Rock)]), Rock), TIE_SEED);
        // Non-remembered columns stay unbiased.
        assert_eq!(table.value(encode(&[(Rock, Scissors)]), Rock), UNBIASED_SEED);
    }

    #[test]
    fn deeper_levels_repeat_the_base_case() {
        let table = QTable::new(2);
        // Only the most recent pair determines the seed, whatever came before.
        for earlier_opp in Choice::ALL {
            for earlier_own in Choice::ALL {
                let state = encode(&[(earlier_opp, earlier_own), (Paper, Scissors)]);
                assert_eq!(table.value(state, Scissors), WIN_SEED);
            }
        }
    }

    #[test]
    fn seeded_ordering_guards_reward_scheme() {
        assert!(WIN_SEED > TIE_SEED);
        assert!(TIE_SEED > LOSS_SEED);
        let table = QTable::new(1);
        let win = table.value(encode(&[(Rock, Paper)]), Paper);
        let tie = table.value(encode(&[(Rock, Rock)]), Rock);
        let loss = table.value(encode(&[(Rock, Scissors)]), Scissors);
        assert!(win > tie && tie > loss);
    }

    #[test]
    fn argmax_breaks_ties_in_enumeration_order() {
        let table = QTable::new(0);
        assert_eq!(table.argmax(0), Rock);
        let mut table = QTable::new(0);
        table.set(0, Scissors, 2.0);
        assert_eq!(table.argmax(0), Scissors);
    }

    fn temp_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("qtable-{tag}-{}.bin", uuid::Uuid::new_v4()))
    }

    #[test]
    fn save_and_load_round_trips() {
        let path = temp_path("roundtrip");
        let mut saved = QTable::new(1);
        saved.set(0, Paper, 7.5);
        assert!(saved.save(&path));
        let mut loaded = QTable::new(1);
        assert!(loaded.load(&path));
        assert_eq!(loaded, saved);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn smaller_table_warm_starts_a_deeper_one() {
        let path = temp_path("prefix");
        let mut shallow = QTable::new(1);
        shallow.set(0, Rock, 4.0);
        assert!(shallow.save(&path));

        let mut deep = QTable::new(2);
        let pristine = deep.clone();
        assert!(deep.load(&path));
        // Overlapping prefix overwritten...
        assert_eq!(deep.value(0, Rock), 4.0);
        // ...deeper rows untouched.
        assert_eq!(deep.rows()[10..], pristine.rows()[10..]);
        assert_eq!(deep.num_states(), pristine.num_states());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn larger_table_replaces_wholesale() {
        let path = temp_path("replace");
        let deep = QTable::new(2);
        assert!(deep.save(&path));
        let mut shallow = QTable::new(1);
        assert!(shallow.load(&path));
        assert_eq!(shallow.num_states(), deep.num_states());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_or_corrupt_file_reports_false_and_keeps_table() {
        let mut table = QTable::new(1);
        let pristine = table.clone();
        assert!(!table.load(temp_path("missing")));
        assert_eq!(table, pristine);

        let path = temp_path("corrupt");
        std::fs::write(&path, b"not a q-table").unwrap();
        assert!(!table.load(&path));
        assert_eq!(table, pristine);
        let _ = std::fs::remove_file(path);
    }
}
