use rayon::prelude::*;

use crate::analytics::{
    best_market_ev, enumerate_round, simulate_race, RaceEstimate, RoundStats,
};
use crate::config::GameConfig;
use crate::engine::apply::draw_checked;
use crate::engine::rank::{leader_of, loser_of};
use crate::state::RoundState;

/// All possible immediate next states after exactly one draw, each with
/// its exact probability.
///
/// Candidates are the pending pieces of the current round, or — when the
/// round is complete and the next draw starts a fresh one — every
/// configured piece with the round bookkeeping reset in the successor.
/// Each (piece, roll) pair is one outcome at `1/(candidates × rolls)`.
pub fn enumerate_next_draw_states(
    state: &RoundState,
    cfg: &GameConfig,
) -> Vec<(f64, RoundState)> {
    let fresh_round = state.round_complete(cfg);
    let candidates: Vec<_> = if fresh_round {
        cfg.pieces().collect()
    } else {
        state.pending().to_vec()
    };

    let n_rolls = cfg.roll_values().len();
    if candidates.is_empty() || n_rolls == 0 {
        return Vec::new();
    }
    let p_each = 1.0 / (candidates.len() * n_rolls) as f64;

    let mut outcomes = Vec::with_capacity(candidates.len() * n_rolls);
    for &piece in &candidates {
        for &magnitude in cfg.roll_values() {
            let mut next = state.clone();
            // draw_checked performs the round rollover itself; the guard
            // only fires if the candidate list above were ever wrong.
            if draw_checked(&mut next, cfg, piece, magnitude).is_err() {
                continue;
            }
            outcomes.push((p_each, next));
        }
    }
    outcomes
}

/// Value one hypothetical successor: deterministic win/loss tables if the
/// race is already decided there, a per-branch simulation otherwise, plus
/// a fresh exact round enumeration either way.
fn best_ev_of_branch(next: &RoundState, cfg: &GameConfig, seed: u64) -> f64 {
    let decided = cfg
        .rank_pieces()
        .any(|p| next.board.position(p) >= cfg.threshold);
    let race = if decided {
        RaceEstimate::decided(
            cfg.piece_count(),
            leader_of(&next.board, cfg),
            loser_of(&next.board, cfg),
        )
    } else {
        simulate_race(next, cfg, cfg.lookahead_sims, seed)
    };
    let round = enumerate_round(next, cfg);
    best_market_ev(&round, &race, cfg)
}

/// EV of drawing once more before betting, relative to betting now:
///
/// `EV(draw) = 1 − E[bestMarketEV(next) − bestMarketEV(current)]`
///
/// 1 is the action's baseline payoff; the subtracted term is the expected
/// improvement in the best available bet purely from the information the
/// draw reveals, which is given up by drawing instead of betting now.
/// The expectation is exact over all immediate next states; each branch is
/// re-valued recursively (enumeration + simulation + market). With no
/// possible draws the baseline 1.0 is returned.
pub fn draw_action_ev(
    state: &RoundState,
    round: &RoundStats,
    race: &RaceEstimate,
    cfg: &GameConfig,
    seed: u64,
) -> f64 {
    let current_best = best_market_ev(round, race, cfg);

    let outcomes = enumerate_next_draw_states(state, cfg);
    if outcomes.is_empty() {
        return 1.0;
    }

    // Branches are independent; per-branch seeds keep the whole valuation
    // reproducible under rayon.
    let expected_best_next: f64 = outcomes
        .par_iter()
        .enumerate()
        .map(|(i, (prob, next))| {
            prob * best_ev_of_branch(next, cfg, seed.wrapping_add(1 + i as u64))
        })
        .sum();

    1.0 - (expected_best_next - current_best)
}
