//! Card locations for one seat.
//!
//! Each seat owns a draw pile and a reserve pile. Cards at stake during a
//! war live in the session's active pool, not here.

pub mod piles;

pub use piles::PlayerPiles;
