use num_traits::ToPrimitive;
use std::cmp::Ordering;

use crate::analytics::{RaceEstimate, RoundStats};
use crate::config::GameConfig;
use crate::types::Piece;

/// Flavors of bet a player can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetKind {
    /// Pays T net on finishing the round 1st, 1 net on 2nd, costs 1 otherwise.
    RoundPlace,
    /// Pays T net if the piece wins the race, costs 1 otherwise.
    RaceWin,
    /// Pays T net if the piece loses the race, costs 1 otherwise.
    RaceLoss,
}

/// One priced bet on the board.
#[derive(Debug, Clone)]
pub struct BetQuote {
    pub piece: Piece,
    pub kind: BetKind,
    pub tier: i64,
    pub ev: f64,
}

/// Every configured bet priced from the probability tables, sorted by EV
/// descending. Only rank-eligible pieces can be bet on.
pub fn list_bets(round: &RoundStats, race: &RaceEstimate, cfg: &GameConfig) -> Vec<BetQuote> {
    let mut quotes = Vec::new();

    for (t, &tier) in cfg.round_tiers.iter().enumerate() {
        for piece in cfg.rank_pieces() {
            let ev = round.round_bet_ev[t][piece.index()]
                .to_f64()
                .unwrap_or(0.0);
            quotes.push(BetQuote {
                piece,
                kind: BetKind::RoundPlace,
                tier,
                ev,
            });
        }
    }

    for &tier in &cfg.race_tiers {
        let payout = (tier + 1) as f64;
        for piece in cfg.rank_pieces() {
            quotes.push(BetQuote {
                piece,
                kind: BetKind::RaceWin,
                tier,
                ev: payout * race.win[piece.index()] - 1.0,
            });
            quotes.push(BetQuote {
                piece,
                kind: BetKind::RaceLoss,
                tier,
                ev: payout * race.lose[piece.index()] - 1.0,
            });
        }
    }

    quotes.sort_by(|a, b| b.ev.partial_cmp(&a.ev).unwrap_or(Ordering::Equal));
    quotes
}

/// The best EV currently available across all configured bets, or 0.0 when
/// no bets are configured.
pub fn best_market_ev(round: &RoundStats, race: &RaceEstimate, cfg: &GameConfig) -> f64 {
    list_bets(round, race, cfg)
        .first()
        .map_or(0.0, |quote| quote.ev)
}
