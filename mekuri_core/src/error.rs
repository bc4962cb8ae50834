use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Card count must be even to pair up")]
    OddCardCount,
    #[error("Face pool is too small for the board")]
    NotEnoughFaces,
    #[error("Face does not appear exactly twice")]
    UnpairedFace,
}

pub type Result<T> = core::result::Result<T, GameError>;
