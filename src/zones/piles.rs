//! A player's draw pile and reserve pile.
//!
//! The draw pile is ordered: index 0 is the next card drawn. The reserve
//! collects won cards in the order they were awarded and is only shuffled
//! back into the draw pile once the draw pile runs dry.
//!
//! Both piles are `im` vectors so cloning a session for a snapshot is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::rng::GameRng;

/// Draw pile plus reserve pile for one seat.
///
/// ## Usage
///
/// ```
/// use war_engine::cards::{Card, Suit};
/// use war_engine::core::GameRng;
/// use war_engine::zones::PlayerPiles;
///
/// let mut rng = GameRng::new(1);
/// let mut piles = PlayerPiles::from_deck(vec![Card::new(Suit::Club, "05", 5)]);
///
/// assert_eq!(piles.draw(&mut rng).map(|c| c.value), Some(5));
/// assert!(piles.draw(&mut rng).is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPiles {
    deck: Vector<Card>,
    reserve: Vector<Card>,
}

impl PlayerPiles {
    /// Create empty piles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create piles with the given draw order and an empty reserve.
    #[must_use]
    pub fn from_deck(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            deck: cards.into_iter().collect(),
            reserve: Vector::new(),
        }
    }

    /// Draw the next card.
    ///
    /// Takes the front of the draw pile. When the draw pile is empty the
    /// reserve is shuffled into it first. Returns `None` when both piles
    /// are empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.deck.is_empty() {
            if self.reserve.is_empty() {
                return None;
            }
            self.replenish(rng);
        }
        self.deck.pop_front()
    }

    /// Shuffle the reserve and move all of it into the draw pile.
    fn replenish(&mut self, rng: &mut GameRng) {
        let reserve = std::mem::take(&mut self.reserve);
        log::debug!("replenishing draw pile from {} reserve cards", reserve.len());
        self.deck.extend(rng.shuffled(reserve));
    }

    /// Put a drawn card back on top of the draw pile.
    pub fn return_to_deck(&mut self, card: Card) {
        self.deck.push_front(card);
    }

    /// Append won cards to the reserve.
    pub fn award(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.reserve.extend(cards);
    }

    /// Draw pile, front first.
    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        &self.deck
    }

    /// Reserve pile, in award order.
    #[must_use]
    pub fn reserve(&self) -> &Vector<Card> {
        &self.reserve
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn reserve_len(&self) -> usize {
        self.reserve.len()
    }

    /// Cards held across both piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.deck.len() + self.reserve.len()
    }

    /// Check whether the player has nothing left to draw.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.total() == 0
    }
}
