use serde::{Deserialize, Serialize};

/// Value fixed for a cell once hazards are placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Hazard,
    /// Number of hazards among the grid-adjacent cells, `0..=8`.
    Clear(u8),
}

impl CellValue {
    pub const fn is_hazard(self) -> bool {
        matches!(self, Self::Hazard)
    }

    /// Numeric encoding where `-1` is a hazard and `0..=8` an adjacency count.
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Hazard => -1,
            Self::Clear(count) => count as i8,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Clear(0)
    }
}

/// Canonical player-visible state stored by the board engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    Revealed,
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a player is allowed to see of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(CellValue),
}
