//! Request/response boundary for the presentation layer.

pub mod fake;

pub use fake::{FakeServer, InFlight};
