//! Error types for the board adapter and puzzle session

use shakmaty::Color;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Invalid FEN: {0}")]
    InvalidFen(#[from] shakmaty::fen::ParseFenError),

    #[error("Illegal position: {0}")]
    IllegalPosition(String),

    #[error("Cannot force {0:?} to move: the other side is in check")]
    CannotForceTurn(Color),

    #[error("Invalid square: {0}")]
    InvalidSquare(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Unknown mode index: {0}")]
    UnknownMode(usize),

    #[error("No hanging pieces for this mode in the given position")]
    NoHangingPieces,

    #[error("Gave up after {0} positions without a hanging piece")]
    GenerationExhausted(u32),

    #[error(transparent)]
    Board(#[from] BoardError),
}
