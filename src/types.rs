/// Integer track coordinate. Positions may go negative when the reverse
/// piece retreats past the origin.
pub type Pos = i32;

/// Index into the configured piece list. Names live in `GameConfig`;
/// the engine only ever deals in ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece(pub u8);

impl Piece {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
