//! Trainer error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainerError {
    #[error("Configuration error: {0}")]
    Config(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },

    #[error("Unknown command: {0:?}")]
    UnknownCommand(String),

    #[error(transparent)]
    Session(#[from] hanging_core::SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
