//! Best-of-N match driver: runs games until one side has enough wins,
//! feeding every completed game (ties included) to both learners.

use crate::models::{Game, Player, Side};
use rand::Rng;

/// Result of a completed match.
#[derive(Clone, Debug)]
pub struct MatchOutcome {
    /// Every game played, in order (ties included).
    pub games: Vec<Game>,
    pub winner: Side,
    pub winner_name: String,
}

impl MatchOutcome {
    pub fn games_played(&self) -> u32 {
        self.games.len() as u32
    }
}

/// Play a match to `wins_required` game wins. Ties increment neither count.
/// After every game both players get a `learn` call with the pre-game history
/// (a no-op for random players). Both win counters are zeroed on entry and on
/// return, since players are reused across the bracket.
pub fn play_match(
    one: &mut Player,
    two: &mut Player,
    wins_required: u32,
    rng: &mut impl Rng,
) -> MatchOutcome {
    one.wins = 0;
    two.wins = 0;
    let mut games: Vec<Game> = Vec::new();

    let winner = loop {
        let game = Game::play(games.len() as u32 + 1, one, two, &games, rng);
        log::debug!("game {}: {}", game.sequence, game.summary);
        match game.winner {
            Some(Side::One) => one.wins += 1,
            Some(Side::Two) => two.wins += 1,
            None => {}
        }

        one.learn(&games, &game);
        two.learn(&games, &game);
        games.push(game);

        if one.wins >= wins_required {
            break Side::One;
        }
        if two.wins >= wins_required {
            break Side::Two;
        }
    };

    one.wins = 0;
    two.wins = 0;
    let winner_name = match winner {
        Side::One => one.name.clone(),
        Side::Two => two.name.clone(),
    };
    MatchOutcome {
        games,
        winner,
        winner_name,
    }
}
