use num_rational::Rational64;

pub mod enumerate;
pub mod lookahead;
pub mod market;
pub mod simulate;

pub use enumerate::enumerate_round;
pub use lookahead::{draw_action_ev, enumerate_next_draw_states};
pub use market::{best_market_ev, list_bets, BetKind, BetQuote};
pub use simulate::simulate_race;

/// Exact end-of-round tables from exhaustive enumeration. All vectors are
/// indexed by piece id; entries for the reverse piece (which cannot place)
/// stay zero in the probability and EV tables.
#[derive(Debug, Clone)]
pub struct RoundStats {
    /// Number of equally likely worlds enumerated.
    pub total_worlds: u64,
    /// Expected end-of-round position per piece.
    pub expected_position: Vec<Rational64>,
    /// P(finishes this round in 1st place) per piece.
    pub first: Vec<Rational64>,
    /// P(finishes this round in 2nd place) per piece.
    pub second: Vec<Rational64>,
    /// Round-bet EV per configured tier (outer, in configured tier order)
    /// and piece (inner): `(T+1)·P(1st) + 2·P(2nd) − 1`.
    pub round_bet_ev: Vec<Vec<Rational64>>,
}

/// Monte-Carlo race estimate. Indexed by piece id; the reverse piece is
/// always reported at zero.
#[derive(Debug, Clone)]
pub struct RaceEstimate {
    pub win: Vec<f64>,
    pub lose: Vec<f64>,
    /// Mean draws until the race completed.
    pub mean_draws: f64,
}

impl RaceEstimate {
    /// Deterministic estimate for an already-decided state: one-hot winner
    /// and loser, no draws needed.
    pub fn decided(piece_count: usize, winner: Option<crate::types::Piece>, loser: Option<crate::types::Piece>) -> Self {
        let mut win = vec![0.0; piece_count];
        let mut lose = vec![0.0; piece_count];
        if let Some(w) = winner {
            win[w.index()] = 1.0;
        }
        if let Some(l) = loser {
            lose[l.index()] = 1.0;
        }
        Self {
            win,
            lose,
            mean_draws: 0.0,
        }
    }
}
