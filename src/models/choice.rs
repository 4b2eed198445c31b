//! Choice (rock/paper/scissors), Side, and game resolution.

use serde::{Deserialize, Serialize};

/// One of the three throwable options. The enumeration order is fixed and is
/// used for Q-table columns and greedy tie-breaking.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// All choices in enumeration order.
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// Column index for Q-table lookups.
    pub fn index(self) -> usize {
        match self {
            Choice::Rock => 0,
            Choice::Paper => 1,
            Choice::Scissors => 2,
        }
    }

    /// Inverse of [`Choice::index`]. Panics on an out-of-range index.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }

    /// The choice this one beats under the cyclic relation
    /// (rock > scissors > paper > rock).
    pub fn beats(self) -> Choice {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Paper => Choice::Rock,
            Choice::Scissors => Choice::Paper,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
        }
    }
}

/// Which seat in a game or match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// Resolve one round: `None` on equal choices, otherwise the side whose
/// choice beats the other. Total over all nine pairs.
pub fn resolve(one: Choice, two: Choice) -> Option<Side> {
    if one == two {
        None
    } else if one.beats() == two {
        Some(Side::One)
    } else {
        Some(Side::Two)
    }
}
