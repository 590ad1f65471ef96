use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board must have at least one row and one column")]
    InvalidDimensions,
    #[error("Board must contain at least one hazard")]
    NoHazards,
    #[error("Too many hazards, at least one cell must stay safe")]
    TooManyHazards,
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, BoardError>;
