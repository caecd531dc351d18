use rand::Rng;
use rayon::prelude::*;

use crate::analytics::RaceEstimate;
use crate::config::GameConfig;
use crate::engine::apply::draw_random;
use crate::engine::rank::loser_of;
use crate::rng::rng_for_stream;
use crate::state::RoundState;
use crate::types::Piece;

#[derive(Debug, Clone)]
struct Counts {
    wins: Vec<u64>,
    losses: Vec<u64>,
    draws: u64,
}

impl Counts {
    fn new(piece_count: usize) -> Self {
        Self {
            wins: vec![0; piece_count],
            losses: vec![0; piece_count],
            draws: 0,
        }
    }

    fn merge(mut self, other: Self) -> Self {
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
        for (a, b) in self.losses.iter_mut().zip(&other.losses) {
            *a += b;
        }
        self.draws += other.draws;
        self
    }
}

/// Drive one cloned race to completion: random draws until a threshold
/// crossing produces a winner, then the loser from the final positions.
fn run_trial<R: Rng>(
    base: &RoundState,
    cfg: &GameConfig,
    rng: &mut R,
) -> (Piece, Option<Piece>, u64) {
    let mut state = base.clone();
    let mut draws: u64 = 0;
    loop {
        let drawn = draw_random(&mut state, cfg, rng);
        draws += 1;
        if let Some(winner) = drawn.winner {
            let loser = loser_of(&state.board, cfg);
            return (winner, loser, draws);
        }
    }
}

/// Monte-Carlo estimate of full-race outcomes from a state.
///
/// Runs `trials` independent races on clones of `state`, each with its own
/// stream of the seeded RNG, so results are reproducible regardless of
/// rayon scheduling. Precision is controlled by `trials`; callers use the
/// configured standalone count for display and the smaller per-branch
/// count inside the lookahead.
///
/// Assumes the race is not already decided (no rank-eligible piece at or
/// past the threshold); the lookahead handles decided states directly.
pub fn simulate_race(
    state: &RoundState,
    cfg: &GameConfig,
    trials: usize,
    seed: u64,
) -> RaceEstimate {
    let piece_count = cfg.piece_count();
    if trials == 0 {
        return RaceEstimate {
            win: vec![0.0; piece_count],
            lose: vec![0.0; piece_count],
            mean_draws: 0.0,
        };
    }

    let counts = (0..trials)
        .into_par_iter()
        .fold(
            || Counts::new(piece_count),
            |mut counts, trial| {
                let mut rng = rng_for_stream(seed, trial as u64);
                let (winner, loser, draws) = run_trial(state, cfg, &mut rng);
                counts.wins[winner.index()] += 1;
                if let Some(l) = loser {
                    counts.losses[l.index()] += 1;
                }
                counts.draws += draws;
                counts
            },
        )
        .reduce(|| Counts::new(piece_count), Counts::merge);

    let n = trials as f64;
    RaceEstimate {
        win: counts.wins.iter().map(|&c| c as f64 / n).collect(),
        lose: counts.losses.iter().map(|&c| c as f64 / n).collect(),
        mean_draws: counts.draws as f64 / n,
    }
}
