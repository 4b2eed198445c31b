//! Tourney: double-elimination tournament state.

use crate::models::bracket::Bracket;
use crate::models::player::Player;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use uuid::Uuid;

/// Default number of game wins required to take a match.
pub const DEFAULT_WINS_REQUIRED: u32 = 2;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TourneyError {
    /// The contestant count is not a (nonzero) power of two.
    PlayerCountNotPowerOfTwo(usize),
    /// A phase was run out of order for the current tournament state.
    InvalidState,
    /// A match was scheduled before both of its feeder slots resolved.
    UnresolvedSlot(String),
}

impl std::fmt::Display for TourneyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourneyError::PlayerCountNotPowerOfTwo(n) => {
                write!(f, "{} players is not a power of 2", n)
            }
            TourneyError::InvalidState => write!(f, "Invalid state for this action"),
            TourneyError::UnresolvedSlot(label) => {
                write!(f, "Bracket slot {} has no resolved player yet", label)
            }
        }
    }
}

/// Unique identifier for a tourney.
pub type TourneyId = Uuid;

/// Phase of the tournament. Transitions are strictly forward.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TourneyState {
    #[default]
    Constructed,
    UpperRunning,
    UpperDone,
    LowerRunning,
    LowerDone,
    ChampionshipRunning,
    Done,
}

/// Append-only log entry for one resolved match.
#[derive(Clone, Debug, Serialize)]
pub struct MatchRecord {
    pub id: Uuid,
    /// Phase label, e.g. "Upper Stage 1" or "Championship Match 2".
    pub label: String,
    pub player_one: String,
    pub player_two: String,
    pub winner: String,
    pub games_played: u32,
}

/// Double-elimination tournament: players, both bracket trees, and the match
/// log. All randomness (seeding shuffle, throws, exploration) flows through
/// the owned RNG, so a fixed seed reproduces the whole tournament.
#[derive(Debug)]
pub struct Tourney {
    pub id: TourneyId,
    pub players: Vec<Player>,
    /// All matches played, in order.
    pub matches: Vec<MatchRecord>,
    pub wins_required: u32,
    /// log2 of the player count.
    pub stage_count: u32,
    pub state: TourneyState,
    pub(crate) upper: Bracket,
    pub(crate) lower: Bracket,
    pub(crate) rng: StdRng,
    pub(crate) champion: Option<usize>,
}

impl Tourney {
    /// Build the bracket topologies and seed a shuffled ordering of the
    /// players onto the upper-bracket leaves. Fails atomically when the
    /// player count is not a power of two.
    pub fn new(players: Vec<Player>, wins_required: u32, seed: u64) -> Result<Self, TourneyError> {
        let n = players.len();
        if n == 0 || n & (n - 1) != 0 {
            return Err(TourneyError::PlayerCountNotPowerOfTwo(n));
        }
        let stage_count = n.trailing_zeros();
        log::info!("Making a bracket with {} stages", stage_count);

        let mut rng = StdRng::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut rng);

        let mut upper = Bracket::upper(stage_count);
        let lower = Bracket::lower(stage_count);
        for (leaf, player) in upper.leaves().into_iter().zip(order) {
            upper.assign(leaf, player, &players[player].name);
        }

        Ok(Tourney {
            id: Uuid::new_v4(),
            players,
            matches: Vec::new(),
            wins_required,
            stage_count,
            state: TourneyState::Constructed,
            upper,
            lower,
            rng,
            champion: None,
        })
    }

    /// Read-only view of the upper bracket tree.
    pub fn upper_bracket(&self) -> &Bracket {
        &self.upper
    }

    /// Read-only view of the lower bracket tree.
    pub fn lower_bracket(&self) -> &Bracket {
        &self.lower
    }

    /// The grand champion, once the tournament is done.
    pub fn champion(&self) -> Option<&Player> {
        self.champion.map(|i| &self.players[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_players(n: usize) -> Vec<Player> {
        (0..n).map(|i| Player::random(format!("P{i}"))).collect()
    }

    #[test]
    fn construction_requires_a_power_of_two() {
        for (n, stages) in [(1usize, 0u32), (2, 1), (4, 2), (8, 3), (16, 4)] {
            let t = Tourney::new(named_players(n), 2, 0).unwrap();
            assert_eq!(t.stage_count, stages, "{n} players");
            assert_eq!(t.state, TourneyState::Constructed);
        }
        for n in [0usize, 3, 5, 6, 7] {
            assert_eq!(
                Tourney::new(named_players(n), 2, 0).unwrap_err(),
                TourneyError::PlayerCountNotPowerOfTwo(n)
            );
        }
    }

    #[test]
    fn every_player_lands_on_exactly_one_leaf() {
        let t = Tourney::new(named_players(8), 2, 42).unwrap();
        let mut seeded: Vec<usize> = t
            .upper_bracket()
            .leaves()
            .into_iter()
            .map(|leaf| t.upper_bracket().node(leaf).player.unwrap())
            .collect();
        seeded.sort_unstable();
        assert_eq!(seeded, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_leaf_order() {
        let a = Tourney::new(named_players(8), 2, 7).unwrap();
        let b = Tourney::new(named_players(8), 2, 7).unwrap();
        let order = |t: &Tourney| {
            t.upper_bracket()
                .leaves()
                .into_iter()
                .map(|leaf| t.upper_bracket().node(leaf).contestant.clone().unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(order(&a), order(&b));
    }
}
