//! # war-engine
//!
//! Round-resolution engine for the War card game.
//!
//! ## Design Principles
//!
//! 1. **Fully resolved responses**: Every draw request runs to completion and
//!    returns an ordered list of `Step`s. Presentation plays them back on its
//!    own schedule; the engine never calls out.
//!
//! 2. **Explicit ownership**: A `GameSession` is created by a new game request
//!    and owned by whoever drives it. No globals.
//!
//! 3. **Conservation**: Every dealt card is always in exactly one pile or in
//!    the active pool.
//!
//! ## Architecture
//!
//! - **Deterministic**: All shuffles come from a seeded ChaCha8 `GameRng`, so a
//!   seed reproduces a whole game.
//!
//! - **Persistent Data Structures**: Piles are `im` vectors; sessions clone in
//!   O(1) and serialize with `bincode`.
//!
//! ## Modules
//!
//! - `core`: Seats, RNG, configuration, errors
//! - `cards`: Cards, suits, rarity, source decks
//! - `zones`: A seat's draw and reserve piles
//! - `rules`: The round resolution state machine and its step records
//! - `server`: Single-flight request boundary with injected latency

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod server;

// Re-export commonly used types
pub use crate::core::{
    AnteDisposition, GameRng, GameRngState, Seat, Seats, WarConfig, WarError, WarRules,
};

pub use crate::cards::{Card, DeckBuilder, DeckDefinition, Rarity, Suit, JOKER_VALUE};

pub use crate::zones::PlayerPiles;

pub use crate::rules::{
    DeckCounts, DrawResponse, GameResult, GameSession, GameState, GameSummary, NewGameResponse,
    RoundOutcome, Step,
};

pub use crate::server::{FakeServer, InFlight};
