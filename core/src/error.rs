use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Please enter your name before starting!")]
    EmptyPlayerName,
    #[error("Cell index is outside the current grid")]
    InvalidCell,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure talking to the leaderboard store. Never fatal to a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("leaderboard request failed: {0}")]
    Transport(String),
    #[error("leaderboard responded with {code}: {message}")]
    Status { code: u16, message: String },
    #[error("leaderboard response could not be decoded: {0}")]
    Decode(String),
}
