//! Card system: cards, suits, rarity tiers, and source decks.
//!
//! ## Key Types
//!
//! - `Card`: Immutable suit + rank + value
//! - `Suit`: Diamond, Heart, Spade, Club, Joker
//! - `Rarity`: Presentation tier derived from value
//! - `DeckDefinition`: Source collection dealt at game start
//! - `DeckBuilder`: Standard deck generation from a rank list

pub mod card;
pub mod deck;

pub use card::{Card, Rarity, Suit, JOKER_VALUE};
pub use deck::{DeckBuilder, DeckDefinition, STANDARD_RANKS};
