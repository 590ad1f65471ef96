use clap::ValueEnum;
use gridsweep_core::{BoardConfig, CellCount, Coord};

use crate::error::InputError;

/// Smallest side length accepted for a custom board.
pub const MIN_SIDE: i64 = 2;

/// Largest side length accepted for a custom board.
pub const MAX_SIDE: i64 = 50;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub const fn difficulty(self) -> Difficulty {
        match self {
            Self::Beginner => Difficulty::beginner(),
            Self::Intermediate => Difficulty::intermediate(),
            Self::Expert => Difficulty::expert(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Difficulty {
    pub rows: Coord,
    pub cols: Coord,
    pub hazards: CellCount,
}

impl Difficulty {
    pub const fn beginner() -> Self {
        Self {
            rows: 9,
            cols: 9,
            hazards: 10,
        }
    }

    pub const fn intermediate() -> Self {
        Self {
            rows: 16,
            cols: 16,
            hazards: 40,
        }
    }

    pub const fn expert() -> Self {
        Self {
            rows: 16,
            cols: 30,
            hazards: 99,
        }
    }

    /// Checks both sides against the supported range.
    pub fn check_size(rows: i64, cols: i64) -> Result<(Coord, Coord), InputError> {
        if rows < MIN_SIDE || cols < MIN_SIDE {
            return Err(InputError::SideTooSmall { min: MIN_SIDE });
        }
        if rows > MAX_SIDE || cols > MAX_SIDE {
            return Err(InputError::SideTooLarge { max: MAX_SIDE });
        }
        // bounded by MAX_SIDE
        Ok((rows as Coord, cols as Coord))
    }

    pub fn custom(rows: i64, cols: i64, hazards: i64) -> Result<Self, InputError> {
        let (rows, cols) = Self::check_size(rows, cols)?;
        let max = i64::from(rows) * i64::from(cols) - 1;
        if !(1..=max).contains(&hazards) {
            return Err(InputError::InvalidHazardCount { max });
        }
        Ok(Self {
            rows,
            cols,
            hazards: hazards as CellCount,
        })
    }

    pub fn board_config(&self) -> gridsweep_core::Result<BoardConfig> {
        BoardConfig::new(self.rows, self.cols, self.hazards)
    }
}
