//! Round resolution engine.
//!
//! - `engine`: `GameSession`, the state machine that draws, compares and
//!   awards cards
//! - `step`: The records handed back to the presentation layer

pub mod engine;
pub mod step;

pub use engine::{GameResult, GameSession, GameState, GameSummary};
pub use step::{DeckCounts, DrawResponse, NewGameResponse, RoundOutcome, Step};
