//! Core engine types: seats, RNG, configuration, errors.
//!
//! These are the building blocks shared by the pile model, the round
//! resolution engine and the server boundary.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{Seat, Seats};
pub use rng::{GameRng, GameRngState};
pub use config::{AnteDisposition, WarConfig, WarRules};
pub use error::WarError;
