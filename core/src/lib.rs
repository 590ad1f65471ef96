//! Board engine for a single-player grid-deduction puzzle.
//!
//! A [`Board`] hides `hazards` cells on a `rows × cols` grid. Hazards are placed lazily on the
//! first reveal, never on the revealed cell, so the opening move is always safe.

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Validated board dimensions and hazard count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    size: Coord2,
    hazards: CellCount,
}

impl BoardConfig {
    /// Requires `rows >= 1`, `cols >= 1` and `0 < hazards < rows * cols`.
    pub fn new(rows: Coord, cols: Coord, hazards: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions);
        }
        if hazards == 0 {
            return Err(BoardError::NoHazards);
        }
        if hazards >= mult(rows, cols) {
            return Err(BoardError::TooManyHazards);
        }
        Ok(Self {
            size: (rows, cols),
            hazards,
        })
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn hazards(&self) -> CellCount {
        self.hazards
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.hazards
    }
}

/// Fixed hazard positions together with the per-cell values derived from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HazardLayout {
    config: BoardConfig,
    hazard_mask: Array2<bool>,
    values: Array2<CellValue>,
}

impl HazardLayout {
    pub fn from_hazard_mask(hazard_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = hazard_mask.dim();
        let rows = Coord::try_from(rows).map_err(|_| BoardError::InvalidDimensions)?;
        let cols = Coord::try_from(cols).map_err(|_| BoardError::InvalidDimensions)?;
        let hazards = hazard_mask.iter().filter(|&&is_hazard| is_hazard).count();
        let hazards = CellCount::try_from(hazards).map_err(|_| BoardError::TooManyHazards)?;
        let config = BoardConfig::new(rows, cols, hazards)?;
        Ok(Self::with_config(config, hazard_mask))
    }

    pub fn from_hazard_coords(size: Coord2, hazard_coords: &[Coord2]) -> Result<Self> {
        let mut hazard_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in hazard_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(BoardError::InvalidCoords);
            }
            hazard_mask[coords.to_nd_index()] = true;
        }

        Self::from_hazard_mask(hazard_mask)
    }

    /// Builds the layout and its adjacency counts; `hazard_mask` must already agree with `config`.
    pub(crate) fn with_config(config: BoardConfig, hazard_mask: Array2<bool>) -> Self {
        let values = Array2::from_shape_fn(hazard_mask.dim(), |(row, col)| {
            // the mask was allocated from a `Coord2` size
            let coords = (row as Coord, col as Coord);
            if hazard_mask[coords.to_nd_index()] {
                CellValue::Hazard
            } else {
                let adjacent = hazard_mask
                    .iter_neighbors(coords)
                    .filter(|pos| hazard_mask[pos.to_nd_index()])
                    .count();
                CellValue::Clear(adjacent as u8)
            }
        });

        let placed = values.iter().filter(|value| value.is_hazard()).count();
        if placed != config.hazards() as usize {
            log::warn!(
                "Hazard layout count mismatch, actual: {}, requested: {}",
                placed,
                config.hazards()
            );
        }

        Self {
            config,
            hazard_mask,
            values,
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn hazard_count(&self) -> CellCount {
        self.config.hazards()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.config.safe_cells()
    }

    pub fn contains_hazard(&self, coords: Coord2) -> bool {
        self.hazard_mask[coords.to_nd_index()]
    }

    pub fn value_at(&self, coords: Coord2) -> CellValue {
        self[coords]
    }

    pub fn iter_hazards(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.hazard_mask
            .indexed_iter()
            .filter(|&(_, &is_hazard)| is_hazard)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.hazard_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for HazardLayout {
    type Output = CellValue;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.values[coords.to_nd_index()]
    }
}

/// Revealed safe cells against the total number of safe cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub revealed: CellCount,
    pub total_safe: CellCount,
}

impl Progress {
    pub const fn is_complete(&self) -> bool {
        self.revealed == self.total_safe
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitHazard,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitHazard => true,
            Won => true,
        }
    }
}
