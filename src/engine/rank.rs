use crate::board::Board;
use crate::config::GameConfig;
use crate::engine::apply::DrawRecord;
use crate::types::Piece;

/// Rank-eligible pieces from best to worst: higher position first, ties
/// broken by height within the shared stack (closer to the top ranks
/// higher). An unstacked piece ranks below stacked pieces at the same
/// position. The reverse piece is excluded entirely.
pub fn rank(board: &Board, cfg: &GameConfig) -> Vec<Piece> {
    let mut ranked: Vec<(Piece, i32, isize)> = cfg
        .rank_pieces()
        .map(|p| {
            let pos = board.position(p);
            let height = board.locate(p).map_or(-1, |(_, i)| i as isize);
            (p, pos, height)
        })
        .collect();
    // Stable sort keeps configured order among fully tied (degenerate) pieces.
    ranked.sort_by(|a, b| (b.1, b.2).cmp(&(a.1, a.2)));
    ranked.into_iter().map(|(p, _, _)| p).collect()
}

/// Did this draw end the race? Only a threshold crossing counts: stack (or
/// standalone piece) below the threshold before, at or past it after.
/// For a stacked crossing the winner is the topmost rank-eligible piece of
/// the landing stack; the reverse piece is skipped and never wins.
pub fn winner_of(board: &Board, cfg: &GameConfig, record: &DrawRecord) -> Option<Piece> {
    if record.in_stack {
        let old = record.old_stack_pos?;
        let new = record.new_stack_pos?;
        if old < cfg.threshold && cfg.threshold <= new {
            let stack = board.stack_at(new)?;
            return stack.iter().rev().copied().find(|&p| cfg.is_ranked(p));
        }
    } else if cfg.is_ranked(record.piece)
        && record.old_pos < cfg.threshold
        && cfg.threshold <= record.new_pos
    {
        return Some(record.piece);
    }
    None
}

/// The loser once the race has ended: minimum position among rank-eligible
/// pieces, ties broken by whoever is bottom-most in the stack at that
/// position (the mirror of the ranking tie-break, where topmost wins).
pub fn loser_of(board: &Board, cfg: &GameConfig) -> Option<Piece> {
    let min_pos = cfg.rank_pieces().map(|p| board.position(p)).min()?;
    let at_min: Vec<Piece> = cfg
        .rank_pieces()
        .filter(|&p| board.position(p) == min_pos)
        .collect();
    if at_min.len() == 1 {
        return at_min.first().copied();
    }
    if let Some(stack) = board.stack_at(min_pos) {
        if let Some(&bottom) = stack.iter().find(|p| at_min.contains(p)) {
            return Some(bottom);
        }
    }
    at_min.first().copied()
}

/// Current front-runner: the top of the ranking. Used when a state is
/// already decided and no simulation is needed.
#[inline]
pub fn leader_of(board: &Board, cfg: &GameConfig) -> Option<Piece> {
    rank(board, cfg).first().copied()
}
