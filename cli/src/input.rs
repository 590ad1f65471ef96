use gridsweep_core::Coord2;

use crate::config::Difficulty;
use crate::error::InputError;

/// One turn typed by the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(i64, i64),
    Flag(i64, i64),
    Quit,
}

impl Command {
    /// Parses `r <row> <col>`, `f <row> <col>` or `q`.
    pub fn parse(line: &str) -> Result<Self, InputError> {
        let line = line.trim().to_lowercase();
        let mut parts = line.split_whitespace();
        let action = parts.next().ok_or(InputError::Empty)?;
        let coords: Vec<&str> = parts.collect();

        let make: fn(i64, i64) -> Self = match action {
            "q" | "quit" => return Ok(Self::Quit),
            "r" | "reveal" => Self::Reveal,
            "f" | "flag" => Self::Flag,
            other => return Err(InputError::UnknownAction(other.to_string())),
        };

        let &[row, col] = coords.as_slice() else {
            return Err(InputError::ExpectedCoords);
        };
        Ok(make(parse_number(row)?, parse_number(col)?))
    }

    /// Rejects coordinates outside a board of `size`.
    pub fn check_bounds(self, (rows, cols): Coord2) -> Result<Self, InputError> {
        let in_bounds = |row: i64, col: i64| {
            (0..i64::from(rows)).contains(&row) && (0..i64::from(cols)).contains(&col)
        };
        match self {
            Self::Reveal(row, col) | Self::Flag(row, col) if !in_bounds(row, col) => {
                Err(InputError::OutOfRange {
                    max_row: i64::from(rows) - 1,
                    max_col: i64::from(cols) - 1,
                })
            }
            _ => Ok(self),
        }
    }
}

/// Entry of the difficulty menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Preset(Difficulty),
    Custom,
}

impl MenuChoice {
    pub fn parse(line: &str) -> Result<Self, InputError> {
        match line.trim() {
            "1" => Ok(Self::Preset(Difficulty::beginner())),
            "2" => Ok(Self::Preset(Difficulty::intermediate())),
            "3" => Ok(Self::Preset(Difficulty::expert())),
            "4" => Ok(Self::Custom),
            _ => Err(InputError::UnknownChoice),
        }
    }
}

pub fn parse_number(text: &str) -> Result<i64, InputError> {
    let text = text.trim();
    text.parse()
        .map_err(|_| InputError::InvalidNumber(text.to_string()))
}

/// `Some(true)` for yes, `Some(false)` for no, `None` otherwise.
pub fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
