#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod types;
pub mod config;
pub mod board;
pub mod state;
pub mod rng;

pub mod engine {
    pub mod apply;
    pub mod rank;
}

pub mod analytics;

// Re-exports: stable minimal API surface for external callers
pub use crate::analytics::{
    best_market_ev, draw_action_ev, enumerate_next_draw_states, enumerate_round, list_bets,
    simulate_race, BetKind, BetQuote, RaceEstimate, RoundStats,
};
pub use crate::board::Board;
pub use crate::config::{load_config_from_json, GameConfig, RawConfig};
pub use crate::engine::apply::{apply_draw, draw_checked, draw_random, DrawRecord, Drawn};
pub use crate::engine::rank::{leader_of, loser_of, rank, winner_of};
pub use crate::rng::rng_for_stream;
pub use crate::state::{RoundState, Session};
pub use crate::types::{Piece, Pos};
