use crate::config::GameConfig;
use crate::types::{Piece, Pos};
use hashbrown::HashMap;

/// Piece positions plus the per-position stacks.
///
/// Stack vectors are ordered bottom (earliest arrival) to top (most
/// recent). Invariants: a piece appears in at most one stack, and a
/// stacked piece's recorded position equals its stack's key. Only the
/// draw engine's transition rule mutates a board after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    positions: Vec<Pos>,
    stacks: HashMap<Pos, Vec<Piece>>,
}

impl Board {
    /// Board seeded with the configured starting layout. Pieces sharing a
    /// starting position stack in declared order (first listed = bottom).
    pub fn with_layout(cfg: &GameConfig) -> Self {
        let mut positions = Vec::with_capacity(cfg.piece_count());
        let mut stacks: HashMap<Pos, Vec<Piece>> = HashMap::new();
        for piece in cfg.pieces() {
            let pos = cfg.start_position(piece);
            positions.push(pos);
            stacks.entry(pos).or_default().push(piece);
        }
        Self { positions, stacks }
    }

    /// Build a board from explicit stacks. Every piece `0..piece_count`
    /// must appear exactly once; positions are derived from stack keys.
    pub fn from_stacks(piece_count: usize, stacks: &[(Pos, Vec<Piece>)]) -> Result<Self, String> {
        let mut positions: Vec<Option<Pos>> = vec![None; piece_count];
        let mut map: HashMap<Pos, Vec<Piece>> = HashMap::new();
        for (pos, stack) in stacks {
            if stack.is_empty() {
                return Err(format!("Empty stack at position {pos}"));
            }
            if map.contains_key(pos) {
                return Err(format!("Duplicate stack at position {pos}"));
            }
            for &piece in stack {
                let slot = positions
                    .get_mut(piece.index())
                    .ok_or_else(|| format!("Piece id {} out of range", piece.0))?;
                if slot.is_some() {
                    return Err(format!("Piece id {} appears in two stacks", piece.0));
                }
                *slot = Some(*pos);
            }
            map.insert(*pos, stack.clone());
        }
        let positions = positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.ok_or_else(|| format!("Piece id {i} missing from stacks")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            positions,
            stacks: map,
        })
    }

    #[inline]
    pub fn piece_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn position(&self, piece: Piece) -> Pos {
        self.positions[piece.index()]
    }

    /// Stack occupying a position, bottom to top.
    #[inline]
    pub fn stack_at(&self, pos: Pos) -> Option<&[Piece]> {
        self.stacks.get(&pos).map(Vec::as_slice)
    }

    /// Locate a piece in the stacks: (stack position, index from bottom).
    pub fn locate(&self, piece: Piece) -> Option<(Pos, usize)> {
        let pos = self.position(piece);
        // The position invariant makes a direct lookup sufficient.
        let stack = self.stacks.get(&pos)?;
        stack.iter().position(|&p| p == piece).map(|i| (pos, i))
    }

    /// Occupied positions in unspecified order.
    #[inline]
    pub fn occupied(&self) -> impl Iterator<Item = (Pos, &[Piece])> {
        self.stacks.iter().map(|(&v, s)| (v, s.as_slice()))
    }

    #[inline]
    pub(crate) fn set_position(&mut self, piece: Piece, pos: Pos) {
        self.positions[piece.index()] = pos;
    }

    /// Split a stack at `index`, leaving the part below and returning the
    /// block from `index` upward. Deletes the stack if nothing remains.
    pub(crate) fn split_stack(&mut self, pos: Pos, index: usize) -> Vec<Piece> {
        match self.stacks.get_mut(&pos) {
            Some(stack) => {
                let block = stack.split_off(index);
                if stack.is_empty() {
                    self.stacks.remove(&pos);
                }
                block
            }
            None => Vec::new(),
        }
    }

    /// Land a block on top of whatever occupies `pos`, preserving its
    /// internal order.
    pub(crate) fn land_block(&mut self, pos: Pos, block: Vec<Piece>) {
        self.stacks.entry(pos).or_default().extend(block);
    }
}
