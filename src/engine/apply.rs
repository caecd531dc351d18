use rand::Rng;

use crate::board::Board;
use crate::config::GameConfig;
use crate::engine::rank::winner_of;
use crate::state::RoundState;
use crate::types::{Piece, Pos};

/// Record of one draw's transition, consumed by winner determination.
#[derive(Debug, Clone)]
pub struct DrawRecord {
    pub piece: Piece,
    /// Signed magnitude actually applied (negative for the reverse piece).
    pub roll: i32,
    /// Whether the piece was found in a stack.
    pub in_stack: bool,
    /// Stack position before/after the move, when stacked.
    pub old_stack_pos: Option<Pos>,
    pub new_stack_pos: Option<Pos>,
    /// The affected block: the drawn piece and everything stacked above
    /// it, bottom to top.
    pub moved: Vec<Piece>,
    /// The drawn piece's own position before/after.
    pub old_pos: Pos,
    pub new_pos: Pos,
}

/// Outcome of one real draw.
#[derive(Debug, Clone, Copy)]
pub struct Drawn {
    pub piece: Piece,
    /// Signed magnitude actually applied.
    pub roll: i32,
    /// Race winner, if this draw ended the race.
    pub winner: Option<Piece>,
}

/// Apply one draw to a board. Total over any reachable state.
///
/// If the piece sits in a stack, the block from the piece to the stack top
/// moves as a unit to `old + roll`, landing on top of whatever occupies
/// that position. The remainder below stays put; an emptied stack is
/// deleted. A piece in no stack (degenerate) just has its own position
/// updated.
pub fn apply_draw(board: &mut Board, piece: Piece, roll: i32) -> DrawRecord {
    let old_pos = board.position(piece);

    if let Some((stack_pos, index)) = board.locate(piece) {
        let block = board.split_stack(stack_pos, index);
        let new_stack_pos = stack_pos + roll;
        for &p in &block {
            let v = board.position(p);
            board.set_position(p, v + roll);
        }
        board.land_block(new_stack_pos, block.clone());
        DrawRecord {
            piece,
            roll,
            in_stack: true,
            old_stack_pos: Some(stack_pos),
            new_stack_pos: Some(new_stack_pos),
            moved: block,
            old_pos,
            new_pos: old_pos + roll,
        }
    } else {
        board.set_position(piece, old_pos + roll);
        DrawRecord {
            piece,
            roll,
            in_stack: false,
            old_stack_pos: None,
            new_stack_pos: None,
            moved: Vec::new(),
            old_pos,
            new_pos: old_pos + roll,
        }
    }
}

/// One random draw step: rolls the round over if complete, samples a piece
/// uniformly from the pending set and a magnitude uniformly from the
/// configured roll values (negated for the reverse piece), applies it, and
/// reports the winner if the race just ended.
pub fn draw_random<R: Rng>(state: &mut RoundState, cfg: &GameConfig, rng: &mut R) -> Drawn {
    if state.round_complete(cfg) {
        state.reset_round(cfg);
    }

    let pending = state.pending();
    let piece = pending[rng.gen_range(0..pending.len())];
    state.take_pending(piece);
    state.draws_taken += 1;

    let rolls = cfg.roll_values();
    let magnitude = rolls[rng.gen_range(0..rolls.len())];
    let roll = cfg.signed_roll(piece, magnitude);

    let record = apply_draw(&mut state.board, piece, roll);
    let winner = winner_of(&state.board, cfg, &record);
    Drawn {
        piece,
        roll,
        winner,
    }
}

/// Boundary-guarded draw of a chosen piece and magnitude: rejects a piece
/// not currently pending, a magnitude outside the configured roll values,
/// and bookkeeping past the draw limit. Rolls the round over exactly like
/// [`draw_random`].
pub fn draw_checked(
    state: &mut RoundState,
    cfg: &GameConfig,
    piece: Piece,
    magnitude: i32,
) -> Result<Drawn, String> {
    if state.draws_taken > cfg.draws_per_round {
        return Err(format!(
            "draws_taken {} exceeds limit {}",
            state.draws_taken, cfg.draws_per_round
        ));
    }
    if !cfg.roll_values().contains(&magnitude) {
        return Err(format!("Roll magnitude {magnitude} is not configured"));
    }
    if state.round_complete(cfg) {
        state.reset_round(cfg);
    }
    if !state.take_pending(piece) {
        return Err(format!(
            "Piece '{}' has already been drawn this round",
            cfg.name(piece)
        ));
    }
    state.draws_taken += 1;

    let roll = cfg.signed_roll(piece, magnitude);
    let record = apply_draw(&mut state.board, piece, roll);
    let winner = winner_of(&state.board, cfg, &record);
    Ok(Drawn {
        piece,
        roll,
        winner,
    })
}
