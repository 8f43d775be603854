//! Error types.
//!
//! Running out of cards is a normal game outcome and never shows up here.
//! `WarError` covers caller misuse (requests the engine rejects without
//! mutating anything) and configuration or snapshot failures.

use crate::cards::Suit;

/// Errors returned by the engine and its boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarError {
    /// A step was requested before any game was started.
    NoSession,
    /// A step was requested while another one is still in flight.
    Busy,
    /// A step was requested after the game ended.
    GameOver,
    /// The source card collection is empty.
    EmptyDeck,
    /// The source card collection holds the same card twice.
    DuplicateCard { suit: Suit, rank: String },
    /// A rank label that cannot be given a value.
    InvalidRank(String),
    /// Configuration could not be parsed.
    Config(String),
    /// A session snapshot could not be encoded or decoded.
    Snapshot(String),
}

impl std::fmt::Display for WarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarError::NoSession => write!(f, "No game has been started"),
            WarError::Busy => write!(f, "A draw request is already in flight"),
            WarError::GameOver => write!(f, "The game has already ended"),
            WarError::EmptyDeck => write!(f, "Source card collection is empty"),
            WarError::DuplicateCard { suit, rank } => {
                write!(f, "Duplicate card in source collection: {}_{}", suit, rank)
            }
            WarError::InvalidRank(rank) => write!(f, "Invalid rank: {:?}", rank),
            WarError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            WarError::Snapshot(msg) => write!(f, "Snapshot error: {}", msg),
        }
    }
}

impl std::error::Error for WarError {}

impl From<serde_json::Error> for WarError {
    fn from(err: serde_json::Error) -> Self {
        WarError::Config(err.to_string())
    }
}

impl From<bincode::Error> for WarError {
    fn from(err: bincode::Error) -> Self {
        WarError::Snapshot(err.to_string())
    }
}
