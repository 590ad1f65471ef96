use thiserror::Error;

/// Problems with a line typed by the player; reported back and re-prompted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a command.")]
    Empty,
    #[error("Unknown action {0:?}, use r (reveal), f (flag) or q (quit).")]
    UnknownAction(String),
    #[error("Please enter two numbers separated by a space.")]
    ExpectedCoords,
    #[error("{0:?} is not a valid number.")]
    InvalidNumber(String),
    #[error("Coordinates out of range, use rows 0-{max_row} and columns 0-{max_col}.")]
    OutOfRange { max_row: i64, max_col: i64 },
    #[error("Please enter 1, 2, 3 or 4.")]
    UnknownChoice,
    #[error("Rows and columns must be at least {min}.")]
    SideTooSmall { min: i64 },
    #[error("Board too large, at most {max}x{max} is supported.")]
    SideTooLarge { max: i64 },
    #[error("Invalid hazard count, choose between 1 and {max}.")]
    InvalidHazardCount { max: i64 },
}
