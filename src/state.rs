use rand::Rng;

use crate::board::Board;
use crate::config::GameConfig;
use crate::engine::apply::{draw_random, Drawn};
use crate::types::Piece;

/// A board plus per-round draw bookkeeping: how many draws this round has
/// used and which pieces have not been drawn yet. Composition over the
/// board keeps clone semantics explicit — cloning a `RoundState` deep
/// copies positions, stacks, and bookkeeping together.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub board: Board,
    pub draws_taken: u32,
    pending: Vec<Piece>,
}

impl RoundState {
    /// Fresh race: configured starting layout, zero draws, all pieces
    /// eligible.
    pub fn new(cfg: &GameConfig) -> Self {
        Self::from_board(Board::with_layout(cfg), cfg)
    }

    /// Wrap an arbitrary board at the start of a round.
    pub fn from_board(board: Board, cfg: &GameConfig) -> Self {
        Self {
            board,
            draws_taken: 0,
            pending: cfg.pieces().collect(),
        }
    }

    /// Wrap a board mid-round. Guards the bookkeeping preconditions:
    /// draws within the configured limit, pending pieces valid and unique.
    pub fn with_round(
        board: Board,
        draws_taken: u32,
        pending: Vec<Piece>,
        cfg: &GameConfig,
    ) -> Result<Self, String> {
        if draws_taken > cfg.draws_per_round {
            return Err(format!(
                "draws_taken {draws_taken} exceeds limit {}",
                cfg.draws_per_round
            ));
        }
        for (i, &p) in pending.iter().enumerate() {
            if p.index() >= cfg.piece_count() {
                return Err(format!("Pending piece id {} out of range", p.0));
            }
            if pending[..i].contains(&p) {
                return Err(format!("Pending piece id {} listed twice", p.0));
            }
        }
        Ok(Self {
            board,
            draws_taken,
            pending,
        })
    }

    /// Pieces not yet drawn this round, in configured order.
    #[inline]
    pub fn pending(&self) -> &[Piece] {
        &self.pending
    }

    /// A round is complete once the draw limit is reached or every piece
    /// has been drawn; the next draw then starts a fresh round.
    #[inline]
    pub fn round_complete(&self, cfg: &GameConfig) -> bool {
        self.draws_taken >= cfg.draws_per_round || self.pending.is_empty()
    }

    /// Draws remaining in the current round.
    #[inline]
    pub fn draws_left(&self, cfg: &GameConfig) -> u32 {
        cfg.draws_per_round.saturating_sub(self.draws_taken)
    }

    /// Remove a piece from the pending set. Returns false if absent.
    pub(crate) fn take_pending(&mut self, piece: Piece) -> bool {
        match self.pending.iter().position(|&p| p == piece) {
            Some(i) => {
                self.pending.remove(i);
                true
            }
            None => false,
        }
    }

    /// Start a new round: draw count back to zero, all pieces eligible.
    pub(crate) fn reset_round(&mut self, cfg: &GameConfig) {
        self.draws_taken = 0;
        self.pending = cfg.pieces().collect();
    }
}

/// Single-owner handle for the live game across user actions: the real
/// round state plus draw history and the winner latch. Analytics calls
/// never touch this; only [`Session::draw`] mutates the live state.
#[derive(Debug, Clone)]
pub struct Session {
    state: RoundState,
    pub total_draws: u64,
    pub last_draw: Option<Drawn>,
    pub race_winner: Option<Piece>,
}

impl Session {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            state: RoundState::new(cfg),
            total_draws: 0,
            last_draw: None,
            race_winner: None,
        }
    }

    /// Snapshot of the live state for analytics calls.
    #[inline]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Back to the configured starting layout.
    pub fn reset(&mut self, cfg: &GameConfig) {
        *self = Self::new(cfg);
    }

    /// Apply one real random draw. Refuses once the race is over; latches
    /// the winner when one emerges.
    pub fn draw<R: Rng>(&mut self, cfg: &GameConfig, rng: &mut R) -> Result<Drawn, String> {
        if let Some(winner) = self.race_winner {
            return Err(format!("Race is already over, winner: {}", cfg.name(winner)));
        }
        let drawn = draw_random(&mut self.state, cfg, rng);
        self.total_draws += 1;
        self.last_draw = Some(drawn);
        if drawn.winner.is_some() {
            self.race_winner = drawn.winner;
        }
        Ok(drawn)
    }
}
