//! Double-elimination bracket traversal: upper bracket with loser routing,
//! lower bracket minor/major stages, and the bracket-reset championship.

use crate::logic::match_play::play_match;
use crate::models::{MatchRecord, Player, Side, Tourney, TourneyError, TourneyState};
use uuid::Uuid;

/// Run the upper bracket from the leaves upward. Each stage-s match records
/// its winner on the parent node and routes the loser into the lower bracket:
/// stage-1 losers fill the `Stage1-Major-Sub` slots (or the lower root in a
/// 2-player tourney), later losers fill their stage's `Minor` slot.
pub fn run_upper_bracket(tourney: &mut Tourney) -> Result<(), TourneyError> {
    if tourney.state != TourneyState::Constructed {
        return Err(TourneyError::InvalidState);
    }
    tourney.state = TourneyState::UpperRunning;

    for stage in 1..=tourney.stage_count {
        log::info!("Upper Stage {}", stage);
        for node in tourney.upper.find_all(&format!("Stage{}", stage + 1)) {
            let (one, two) = feeder_players(tourney, true, node)?;
            let (winner, loser) =
                play_logged_match(tourney, format!("Upper Stage {stage}"), one, two);
            let name = tourney.players[winner].name.clone();
            tourney.upper.assign(node, winner, &name);
            route_loser(tourney, stage, loser)?;
        }
    }

    log::info!("End of Upper Bracket");
    tourney.state = TourneyState::UpperDone;
    Ok(())
}

/// Run the lower bracket in increasing stage order: minor matches first
/// (routed upper loser vs. advancing lower winner), then major matches.
/// Lower-bracket losers are eliminated permanently.
pub fn run_lower_bracket(tourney: &mut Tourney) -> Result<(), TourneyError> {
    if tourney.state != TourneyState::UpperDone {
        return Err(TourneyError::InvalidState);
    }
    tourney.state = TourneyState::LowerRunning;

    for stage in 1..=tourney.stage_count {
        log::info!("Lower Stage {}", stage);
        // Stage 1 has no minor slot; its Major-Sub nodes are leaf loser slots.
        if stage > 1 {
            for node in tourney.lower.find_all(&format!("Stage{stage}-Major-Sub")) {
                resolve_lower_node(tourney, node, format!("Lower Stage {stage} Minor"))?;
            }
        }
        for node in tourney.lower.find_all(&format!("Stage{stage}-Major")) {
            resolve_lower_node(tourney, node, format!("Lower Stage {stage} Major"))?;
        }
    }

    log::info!("End of Lower Bracket");
    tourney.state = TourneyState::LowerDone;
    Ok(())
}

/// Run the grand championship. The lower-bracket champion must beat the
/// upper-bracket champion twice: a first win forces a bracket-reset rematch
/// whose result is final either way. When the lower bracket never produced a
/// champion (single-contestant tourney), the upper champion takes the title
/// outright.
pub fn run_championship(tourney: &mut Tourney) -> Result<(), TourneyError> {
    if tourney.state != TourneyState::LowerDone {
        return Err(TourneyError::InvalidState);
    }
    tourney.state = TourneyState::ChampionshipRunning;

    let upper_champ = tourney
        .upper
        .root_player()
        .ok_or_else(|| TourneyError::UnresolvedSlot(tourney.upper.node(0).label.clone()))?;

    let champion = match tourney.lower.root_player() {
        None => upper_champ,
        Some(lower_champ) => {
            let (winner, _) = play_logged_match(
                tourney,
                "Championship Match 1".to_string(),
                upper_champ,
                lower_champ,
            );
            if winner == lower_champ {
                // Bracket reset: the upper champion now also has one loss.
                let (winner, _) = play_logged_match(
                    tourney,
                    "Championship Match 2".to_string(),
                    upper_champ,
                    lower_champ,
                );
                winner
            } else {
                winner
            }
        }
    };

    log::info!("Grand Champion: {}", tourney.players[champion].name);
    tourney.champion = Some(champion);
    tourney.state = TourneyState::Done;
    Ok(())
}

/// Run all three phases in order.
pub fn run_tourney(tourney: &mut Tourney) -> Result<(), TourneyError> {
    run_upper_bracket(tourney)?;
    run_lower_bracket(tourney)?;
    run_championship(tourney)
}

/// Resolve one lower-bracket internal node: match its two children's players,
/// record the winner on the node, and charge the loser (who is out).
fn resolve_lower_node(
    tourney: &mut Tourney,
    node: usize,
    label: String,
) -> Result<(), TourneyError> {
    let (one, two) = feeder_players(tourney, false, node)?;
    let (winner, _) = play_logged_match(tourney, label, one, two);
    let name = tourney.players[winner].name.clone();
    tourney.lower.assign(node, winner, &name);
    Ok(())
}

/// Player indices held by a node's two children. Stage gating: a missing
/// player means an earlier stage has not resolved.
fn feeder_players(
    tourney: &Tourney,
    upper: bool,
    node: usize,
) -> Result<(usize, usize), TourneyError> {
    let bracket = if upper { &tourney.upper } else { &tourney.lower };
    let children = &bracket.node(node).children;
    debug_assert_eq!(children.len(), 2);
    let mut players = [0usize; 2];
    for (slot, &child) in players.iter_mut().zip(children) {
        *slot = bracket
            .node(child)
            .player
            .ok_or_else(|| TourneyError::UnresolvedSlot(bracket.node(child).label.clone()))?;
    }
    Ok((players[0], players[1]))
}

/// Play one bracket match between players `a` and `b` (indices into the
/// tourney's player list), append it to the match log, and charge the loser.
/// Returns (winner, loser) indices.
fn play_logged_match(tourney: &mut Tourney, label: String, a: usize, b: usize) -> (usize, usize) {
    let wins_required = tourney.wins_required;
    let (one, two) = pair_mut(&mut tourney.players, a, b);
    log::info!("{}: {} v. {}", label, one.name, two.name);
    let outcome = play_match(one, two, wins_required, &mut tourney.rng);
    log::info!(
        "{} wins the match in {} games",
        outcome.winner_name,
        outcome.games_played()
    );

    let record = MatchRecord {
        id: Uuid::new_v4(),
        label,
        player_one: one.name.clone(),
        player_two: two.name.clone(),
        winner: outcome.winner_name.clone(),
        games_played: outcome.games_played(),
    };
    tourney.matches.push(record);

    let (winner, loser) = match outcome.winner {
        Side::One => (a, b),
        Side::Two => (b, a),
    };
    tourney.players[loser].add_loss();
    (winner, loser)
}

/// Route an upper-bracket stage-s loser into the lower bracket. Stage-1
/// losers fill `Stage1-Major-Sub` slots (or the lower root when the bracket
/// is the 2-player degenerate case); later stages fill their `Minor` slot.
/// The routing table is exercised for brackets up to 16 contestants and is
/// kept exactly as-is.
fn route_loser(tourney: &mut Tourney, stage: u32, loser: usize) -> Result<(), TourneyError> {
    let slot = if stage == 1 {
        if tourney.stage_count == 1 {
            Some(0)
        } else {
            tourney.lower.first_unfilled("Stage1-Major-Sub")
        }
    } else {
        tourney.lower.first_unfilled(&format!("Stage{stage}-Minor"))
    };
    let slot = slot.ok_or_else(|| TourneyError::UnresolvedSlot(format!("Stage{stage} loser slot")))?;
    let name = tourney.players[loser].name.clone();
    tourney.lower.assign(slot, loser, &name);
    Ok(())
}

/// Disjoint mutable borrows of two players by index.
fn pair_mut(players: &mut [Player], a: usize, b: usize) -> (&mut Player, &mut Player) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = players.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = players.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
