//! Card values.
//!
//! A `Card` is immutable once created. Its identity is suit + rank; the
//! `value` is the strength used to compare draws and is derived from the rank
//! when the deck is built.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Value carried by jokers. Beats every ranked card.
pub const JOKER_VALUE: i32 = 999;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Diamond,
    Heart,
    Spade,
    Club,
    Joker,
}

impl Suit {
    /// The four ranked suits, in deck order.
    pub const RANKED: [Suit; 4] = [Suit::Diamond, Suit::Heart, Suit::Spade, Suit::Club];
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Diamond => "Diamond",
            Suit::Heart => "Heart",
            Suit::Spade => "Spade",
            Suit::Club => "Club",
            Suit::Joker => "Joker",
        };
        f.write_str(name)
    }
}

/// Presentation tier of a card, used to pick the win effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    /// Number cards.
    Common,
    /// J, Q, K.
    Rare,
    /// Ace (high).
    Epic,
    /// Anything above an ace, i.e. jokers.
    Legendary,
}

impl Rarity {
    /// Tier for a raw card value.
    #[must_use]
    pub const fn from_value(value: i32) -> Self {
        match value {
            11..=13 => Rarity::Rare,
            14 => Rarity::Epic,
            v if v > 14 => Rarity::Legendary,
            _ => Rarity::Common,
        }
    }
}

/// A playing card.
///
/// ## Example
///
/// ```
/// use war_engine::cards::{Card, Rarity, Suit};
///
/// let queen = Card::new(Suit::Heart, "Q", 12);
/// assert_eq!(queen.to_string(), "Heart_Q");
/// assert_eq!(queen.rarity(), Rarity::Rare);
/// assert!(queen.beats(&Card::new(Suit::Club, "10", 10)));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: String,
    pub value: i32,
}

impl Card {
    /// Create a new card.
    #[must_use]
    pub fn new(suit: Suit, rank: impl Into<String>, value: i32) -> Self {
        Self {
            suit,
            rank: rank.into(),
            value,
        }
    }

    /// Create a joker with the given label ("Red", "Black").
    #[must_use]
    pub fn joker(label: impl Into<String>) -> Self {
        Self::new(Suit::Joker, label, JOKER_VALUE)
    }

    /// Check whether this card wins a draw against `other`.
    #[must_use]
    pub fn beats(&self, other: &Card) -> bool {
        self.value > other.value
    }

    /// Presentation tier of this card.
    #[must_use]
    pub fn rarity(&self) -> Rarity {
        Rarity::from_value(self.value)
    }

    #[must_use]
    pub fn is_joker(&self) -> bool {
        self.suit == Suit::Joker
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.suit.hash(state);
        self.rank.hash(state);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.suit, self.rank)
    }
}
