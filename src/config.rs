use crate::types::{Piece, Pos};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Raw on-disk shape of the game configuration. Deserialized as-is, then
/// validated into a [`GameConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfig {
    pub pieces: Vec<String>,
    pub reverse: String,
    pub roll_values: Vec<i32>,
    pub threshold: Pos,
    pub draws_per_round: u32,
    pub round_tiers: Vec<i64>,
    pub race_tiers: Vec<i64>,
    pub race_sims: usize,
    pub lookahead_sims: usize,
    pub start: Vec<Pos>,
}

/// Validated, read-only configuration for a run: piece set, mechanics
/// constants, bet tiers, and Monte-Carlo sample sizes.
///
/// The rank-eligible set is every piece except the reverse piece, which
/// moves backward when drawn and can never win, lose, or place.
#[derive(Debug, Clone)]
pub struct GameConfig {
    names: Vec<String>,
    reverse: Piece,
    roll_values: Vec<i32>,
    pub threshold: Pos,
    pub draws_per_round: u32,
    pub round_tiers: Vec<i64>,
    pub race_tiers: Vec<i64>,
    pub race_sims: usize,
    pub lookahead_sims: usize,
    start: Vec<Pos>,
}

impl GameConfig {
    /// Validate a raw configuration into a usable one.
    pub fn from_raw(raw: RawConfig) -> Result<Self, String> {
        if raw.pieces.len() < 2 {
            return Err("Config needs at least 2 pieces".to_string());
        }
        if raw.pieces.len() > usize::from(u8::MAX) {
            return Err(format!("Too many pieces ({})", raw.pieces.len()));
        }
        for (i, a) in raw.pieces.iter().enumerate() {
            if raw.pieces[..i].contains(a) {
                return Err(format!("Duplicate piece name '{a}'"));
            }
        }
        let reverse_idx = raw
            .pieces
            .iter()
            .position(|n| *n == raw.reverse)
            .ok_or_else(|| format!("Reverse piece '{}' not in piece list", raw.reverse))?;
        if raw.pieces.len() - 1 < 2 {
            return Err("Config needs at least 2 rank-eligible pieces".to_string());
        }
        if raw.roll_values.is_empty() {
            return Err("Config needs at least one roll value".to_string());
        }
        if raw.roll_values.iter().any(|&v| v <= 0) {
            return Err("Roll values must be positive magnitudes".to_string());
        }
        if raw.draws_per_round == 0 {
            return Err("draws_per_round must be at least 1".to_string());
        }
        if raw.start.len() != raw.pieces.len() {
            return Err(format!(
                "start has {} entries but there are {} pieces",
                raw.start.len(),
                raw.pieces.len()
            ));
        }
        if raw.race_sims == 0 || raw.lookahead_sims == 0 {
            return Err("Simulation sample counts must be at least 1".to_string());
        }

        Ok(Self {
            names: raw.pieces,
            reverse: Piece(reverse_idx as u8),
            roll_values: raw.roll_values,
            threshold: raw.threshold,
            draws_per_round: raw.draws_per_round,
            round_tiers: raw.round_tiers,
            race_tiers: raw.race_tiers,
            race_sims: raw.race_sims,
            lookahead_sims: raw.lookahead_sims,
            start: raw.start,
        })
    }

    #[inline]
    pub fn piece_count(&self) -> usize {
        self.names.len()
    }

    /// All pieces in configured order.
    #[inline]
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        (0..self.names.len()).map(|i| Piece(i as u8))
    }

    /// Rank-eligible pieces in configured order (everything except the
    /// reverse piece).
    #[inline]
    pub fn rank_pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        let reverse = self.reverse;
        self.pieces().filter(move |&p| p != reverse)
    }

    #[inline]
    pub fn reverse(&self) -> Piece {
        self.reverse
    }

    #[inline]
    pub fn is_ranked(&self, piece: Piece) -> bool {
        piece != self.reverse
    }

    #[inline]
    pub fn name(&self, piece: Piece) -> &str {
        &self.names[piece.index()]
    }

    #[inline]
    pub fn piece_by_name(&self, name: &str) -> Option<Piece> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| Piece(i as u8))
    }

    #[inline]
    pub fn roll_values(&self) -> &[i32] {
        &self.roll_values
    }

    #[inline]
    pub fn start_position(&self, piece: Piece) -> Pos {
        self.start[piece.index()]
    }

    /// Signed roll actually applied for a piece: the reverse piece moves
    /// backward, everything else forward.
    #[inline]
    pub fn signed_roll(&self, piece: Piece, magnitude: i32) -> i32 {
        if piece == self.reverse {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl Default for GameConfig {
    /// The standard six-piece game: race to 16, rolls 1-3, five draws per
    /// round, Gray retreating from 15.
    fn default() -> Self {
        Self {
            names: ["Red", "Blue", "Green", "Orange", "Purple", "Gray"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            reverse: Piece(5),
            roll_values: vec![1, 2, 3],
            threshold: 16,
            draws_per_round: 5,
            round_tiers: vec![5, 3, 2],
            race_tiers: vec![8, 5, 3],
            race_sims: 500,
            lookahead_sims: 100,
            start: vec![3, 2, 1, 1, 1, 15],
        }
    }
}

/// Load a configuration from a JSON file (runtime), validating it.
pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> Result<GameConfig, String> {
    let data =
        fs::read_to_string(path.as_ref()).map_err(|e| format!("Failed to read JSON: {e}"))?;
    let raw: RawConfig =
        serde_json::from_str(&data).map_err(|e| format!("Failed to parse JSON: {e}"))?;
    GameConfig::from_raw(raw)
}
