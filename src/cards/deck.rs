//! Source card collections.
//!
//! `DeckDefinition` is the static collection dealt at the start of every game.
//! It provides lookup by identity (suit + rank) and validation. `DeckBuilder`
//! generates standard decks from a rank list.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, Suit};
use crate::core::WarError;

/// Ranks of a standard deck, lowest first.
pub const STANDARD_RANKS: [&str; 13] = [
    "02", "03", "04", "05", "06", "07", "08", "09", "10", "J", "Q", "K", "A",
];

/// Static source collection of cards.
///
/// Serializes as a plain list of cards.
///
/// ## Example
///
/// ```
/// use war_engine::cards::{DeckDefinition, Suit};
///
/// let deck = DeckDefinition::standard();
/// assert_eq!(deck.len(), 52);
///
/// let ace = deck.find(Suit::Spade, "A").unwrap();
/// assert_eq!(ace.value, 14);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Card>", into = "Vec<Card>")]
pub struct DeckDefinition {
    cards: Vec<Card>,
    index: FxHashMap<(Suit, String), usize>,
}

impl DeckDefinition {
    /// Create a definition from a list of cards.
    ///
    /// Duplicates are kept as given; `validate` reports them.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        let mut index = FxHashMap::default();
        for (i, card) in cards.iter().enumerate() {
            index.entry((card.suit, card.rank.clone())).or_insert(i);
        }
        Self { cards, index }
    }

    /// The standard 52-card, ace-high deck without jokers.
    #[must_use]
    pub fn standard() -> Self {
        DeckBuilder::new().build_lossy()
    }

    /// The standard deck plus a red and a black joker.
    #[must_use]
    pub fn standard_with_jokers() -> Self {
        DeckBuilder::new().with_jokers(true).build_lossy()
    }

    /// Parse a definition from a JSON list of cards.
    pub fn from_json(json: &str) -> Result<Self, WarError> {
        let deck: DeckDefinition = serde_json::from_str(json)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Check that the collection can be dealt.
    ///
    /// Fails on an empty collection or on a card that appears twice.
    pub fn validate(&self) -> Result<(), WarError> {
        if self.cards.is_empty() {
            return Err(WarError::EmptyDeck);
        }
        if self.index.len() != self.cards.len() {
            let mut seen = rustc_hash::FxHashSet::default();
            for card in &self.cards {
                if !seen.insert((card.suit, card.rank.as_str())) {
                    return Err(WarError::DuplicateCard {
                        suit: card.suit,
                        rank: card.rank.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up a card by identity.
    #[must_use]
    pub fn find(&self, suit: Suit, rank: &str) -> Option<&Card> {
        self.index
            .get(&(suit, rank.to_string()))
            .map(|&i| &self.cards[i])
    }

    /// All cards, in definition order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl PartialEq for DeckDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards
    }
}

impl From<Vec<Card>> for DeckDefinition {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

impl From<DeckDefinition> for Vec<Card> {
    fn from(deck: DeckDefinition) -> Self {
        deck.cards
    }
}

/// Generates decks from a rank list.
///
/// Rank labels are normalized ("jack" becomes "J", "7" becomes "07" when
/// zero padding is on) and valued: numbers by face value clamped to 2..=10,
/// J=11, Q=12, K=13, A=14 (or 1 when ace-low).
#[derive(Clone, Debug)]
pub struct DeckBuilder {
    ranks: Vec<String>,
    ace_high: bool,
    zero_pad: bool,
    jokers: bool,
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self {
            ranks: STANDARD_RANKS.iter().map(|r| r.to_string()).collect(),
            ace_high: true,
            zero_pad: true,
            jokers: false,
        }
    }
}

impl DeckBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rank list. Blank entries are skipped.
    #[must_use]
    pub fn ranks<I, S>(mut self, ranks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ranks = ranks.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn ace_high(mut self, ace_high: bool) -> Self {
        self.ace_high = ace_high;
        self
    }

    #[must_use]
    pub fn zero_pad(mut self, zero_pad: bool) -> Self {
        self.zero_pad = zero_pad;
        self
    }

    #[must_use]
    pub fn with_jokers(mut self, jokers: bool) -> Self {
        self.jokers = jokers;
        self
    }

    /// Build the deck: every rank in each of the four ranked suits, then the
    /// jokers if enabled.
    pub fn build(self) -> Result<DeckDefinition, WarError> {
        let mut ranked = Vec::with_capacity(self.ranks.len());
        for raw in self.ranks.iter().filter(|r| !r.trim().is_empty()) {
            let rank = normalize_rank(raw, self.zero_pad);
            let value = rank_value(&rank, self.ace_high)?;
            ranked.push((rank, value));
        }

        if ranked.is_empty() {
            return Err(WarError::EmptyDeck);
        }

        let mut cards = Vec::with_capacity(ranked.len() * 4 + 2);
        for suit in Suit::RANKED {
            for (rank, value) in &ranked {
                cards.push(Card::new(suit, rank.clone(), *value));
            }
        }

        if self.jokers {
            cards.push(Card::joker("Red"));
            cards.push(Card::joker("Black"));
        }

        let deck = DeckDefinition::new(cards);
        deck.validate()?;
        Ok(deck)
    }

    // Only used with the built-in rank list, which always builds.
    fn build_lossy(self) -> DeckDefinition {
        self.build().unwrap_or_default()
    }
}

fn normalize_rank(raw: &str, zero_pad: bool) -> String {
    let upper = raw.trim().to_uppercase();
    let rank = match upper.as_str() {
        "JACK" => "J".to_string(),
        "QUEEN" => "Q".to_string(),
        "KING" => "K".to_string(),
        "ACE" => "A".to_string(),
        _ => upper,
    };

    match rank.parse::<u32>() {
        Ok(n) if zero_pad => format!("{:02}", n),
        Ok(n) => n.to_string(),
        Err(_) => rank,
    }
}

fn rank_value(rank: &str, ace_high: bool) -> Result<i32, WarError> {
    match rank {
        "A" => Ok(if ace_high { 14 } else { 1 }),
        "K" => Ok(13),
        "Q" => Ok(12),
        "J" => Ok(11),
        other => other
            .parse::<i32>()
            .map(|v| v.clamp(2, 10))
            .map_err(|_| WarError::InvalidRank(other.to_string())),
    }
}
