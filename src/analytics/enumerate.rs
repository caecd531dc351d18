use num_rational::Rational64;
use rayon::prelude::*;

use crate::analytics::RoundStats;
use crate::board::Board;
use crate::config::GameConfig;
use crate::engine::apply::apply_draw;
use crate::engine::rank::rank;
use crate::state::RoundState;
use crate::types::Piece;

/// Per-world counts, merged commutatively across parallel branches.
#[derive(Debug, Clone)]
struct Tally {
    worlds: u64,
    position_sums: Vec<i64>,
    first: Vec<u64>,
    second: Vec<u64>,
}

impl Tally {
    fn new(piece_count: usize) -> Self {
        Self {
            worlds: 0,
            position_sums: vec![0; piece_count],
            first: vec![0; piece_count],
            second: vec![0; piece_count],
        }
    }

    fn record(&mut self, board: &Board, cfg: &GameConfig) {
        self.worlds += 1;
        for piece in cfg.pieces() {
            self.position_sums[piece.index()] += i64::from(board.position(piece));
        }
        let ranking = rank(board, cfg);
        if let Some(&first) = ranking.first() {
            self.first[first.index()] += 1;
        }
        if let Some(&second) = ranking.get(1) {
            self.second[second.index()] += 1;
        }
    }

    fn merge(mut self, other: Self) -> Self {
        self.worlds += other.worlds;
        for (a, b) in self.position_sums.iter_mut().zip(&other.position_sums) {
            *a += b;
        }
        for (a, b) in self.first.iter_mut().zip(&other.first) {
            *a += b;
        }
        for (a, b) in self.second.iter_mut().zip(&other.second) {
            *a += b;
        }
        self
    }
}

/// Depth-first replay of every ordered draw sequence and roll assignment.
/// The pending vector is restored after each branch so one allocation
/// serves the whole subtree.
fn enumerate_worlds(
    board: &Board,
    pending: &mut Vec<Piece>,
    draws_left: u32,
    cfg: &GameConfig,
    tally: &mut Tally,
) {
    if draws_left == 0 || pending.is_empty() {
        tally.record(board, cfg);
        return;
    }
    for i in 0..pending.len() {
        let piece = pending.remove(i);
        for &magnitude in cfg.roll_values() {
            let mut next = board.clone();
            apply_draw(&mut next, piece, cfg.signed_roll(piece, magnitude));
            enumerate_worlds(&next, pending, draws_left - 1, cfg, tally);
        }
        pending.insert(i, piece);
    }
}

/// Exhaustively enumerate every possible way the current round can finish.
///
/// Worlds are all ordered selections of the remaining draws from the
/// pending set crossed with all roll assignments; each is equally likely
/// because piece selection is uniform without replacement and rolls are
/// uniform and independent. A round with no draws left (or no pending
/// pieces) yields exactly one world: the state as it stands.
///
/// All probabilities and EVs are exact rationals; the world count is small
/// enough for exhaustive enumeration, and displayed probabilities should
/// not carry floating error.
pub fn enumerate_round(state: &RoundState, cfg: &GameConfig) -> RoundStats {
    let piece_count = cfg.piece_count();
    let draws_left = state.draws_left(cfg);

    let tally = if draws_left == 0 || state.pending().is_empty() {
        let mut tally = Tally::new(piece_count);
        tally.record(&state.board, cfg);
        tally
    } else {
        // First draw level fans out in parallel; each branch walks its
        // subtree sequentially. World aggregation is commutative, so
        // branch order does not matter.
        let branches: Vec<(usize, i32)> = (0..state.pending().len())
            .flat_map(|i| cfg.roll_values().iter().map(move |&m| (i, m)))
            .collect();
        branches
            .par_iter()
            .map(|&(i, magnitude)| {
                let mut pending = state.pending().to_vec();
                let piece = pending.remove(i);
                let mut board = state.board.clone();
                apply_draw(&mut board, piece, cfg.signed_roll(piece, magnitude));
                let mut tally = Tally::new(piece_count);
                enumerate_worlds(&board, &mut pending, draws_left - 1, cfg, &mut tally);
                tally
            })
            .reduce(|| Tally::new(piece_count), Tally::merge)
    };

    let worlds = tally.worlds as i64;
    let ratio = |count: i64| Rational64::new(count, worlds);

    let expected_position: Vec<Rational64> =
        tally.position_sums.iter().map(|&s| ratio(s)).collect();
    let first: Vec<Rational64> = tally.first.iter().map(|&c| ratio(c as i64)).collect();
    let second: Vec<Rational64> = tally.second.iter().map(|&c| ratio(c as i64)).collect();

    // Round bet pays T net on 1st, 1 net on 2nd, costs 1 otherwise:
    // EV = (T+1)·P1 + 2·P2 − 1.
    let one = Rational64::from_integer(1);
    let two = Rational64::from_integer(2);
    let round_bet_ev: Vec<Vec<Rational64>> = cfg
        .round_tiers
        .iter()
        .map(|&tier| {
            let payout = Rational64::from_integer(tier + 1);
            cfg.pieces()
                .map(|p| {
                    if cfg.is_ranked(p) {
                        payout * first[p.index()] + two * second[p.index()] - one
                    } else {
                        Rational64::from_integer(0)
                    }
                })
                .collect()
        })
        .collect();

    RoundStats {
        total_worlds: tally.worlds,
        expected_position,
        first,
        second,
        round_bet_ev,
    }
}
