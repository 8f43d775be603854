//! Records produced by the engine for the presentation layer.
//!
//! A `Step` describes one drawn pair. A `DrawResponse` is the ordered list
//! of steps produced by one draw request; callers play them back in order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::Seat;

/// Outcome of a single drawn pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    P1Win,
    P2Win,
    /// Equal values; the war continues.
    War,
    /// Both players ran out at once.
    Tie,
}

impl RoundOutcome {
    /// The seat that took the pair, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Seat> {
        match self {
            RoundOutcome::P1Win => Some(Seat::P1),
            RoundOutcome::P2Win => Some(Seat::P2),
            RoundOutcome::War | RoundOutcome::Tie => None,
        }
    }

    /// The outcome that awards to `seat`.
    #[must_use]
    pub const fn win_for(seat: Seat) -> Self {
        match seat {
            Seat::P1 => RoundOutcome::P1Win,
            Seat::P2 => RoundOutcome::P2Win,
        }
    }
}

/// Snapshot of all four pile sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckCounts {
    pub p1_deck: usize,
    pub p1_reserve: usize,
    pub p2_deck: usize,
    pub p2_reserve: usize,
}

impl DeckCounts {
    /// Cards held by both players. Excludes the active pool.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.p1_deck + self.p1_reserve + self.p2_deck + self.p2_reserve
    }

    /// Draw pile size for a seat.
    #[must_use]
    pub const fn deck(&self, seat: Seat) -> usize {
        match seat {
            Seat::P1 => self.p1_deck,
            Seat::P2 => self.p2_deck,
        }
    }

    /// Reserve size for a seat.
    #[must_use]
    pub const fn reserve(&self, seat: Seat) -> usize {
        match seat {
            Seat::P1 => self.p1_reserve,
            Seat::P2 => self.p2_reserve,
        }
    }
}

/// One drawn pair and what it did to the game.
///
/// Steps are built once by the engine and only read afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    p1_card: Option<Card>,
    p2_card: Option<Card>,
    outcome: RoundOutcome,
    ignore_step_calculation: bool,
    is_game_over: bool,
    counts: DeckCounts,
}

impl Step {
    pub(crate) fn new(
        p1_card: Option<Card>,
        p2_card: Option<Card>,
        outcome: RoundOutcome,
        ignore_step_calculation: bool,
        is_game_over: bool,
        counts: DeckCounts,
    ) -> Self {
        Self {
            p1_card,
            p2_card,
            outcome,
            ignore_step_calculation,
            is_game_over,
            counts,
        }
    }

    /// Card drawn by player 1, `None` if they were out.
    #[must_use]
    pub fn p1_card(&self) -> Option<&Card> {
        self.p1_card.as_ref()
    }

    /// Card drawn by player 2, `None` if they were out.
    #[must_use]
    pub fn p2_card(&self) -> Option<&Card> {
        self.p2_card.as_ref()
    }

    /// Card drawn by `seat`.
    #[must_use]
    pub fn card(&self, seat: Seat) -> Option<&Card> {
        match seat {
            Seat::P1 => self.p1_card(),
            Seat::P2 => self.p2_card(),
        }
    }

    #[must_use]
    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    /// Face-down ante draw: must not trigger win or war presentation.
    #[must_use]
    pub fn ignore_step_calculation(&self) -> bool {
        self.ignore_step_calculation
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    /// Pile sizes right after this step was applied.
    #[must_use]
    pub fn counts(&self) -> DeckCounts {
        self.counts
    }
}

/// Steps produced by one draw request, in playback order.
///
/// Holds one step in the running state and up to `ante_count + 1` during a
/// war, so the common case stays inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResponse {
    pub steps: SmallVec<[Step; 4]>,
}

impl DrawResponse {
    /// The step that ended the game, if this response ended it.
    #[must_use]
    pub fn game_over_step(&self) -> Option<&Step> {
        self.steps.iter().find(|s| s.is_game_over())
    }

    /// The last step of the response.
    #[must_use]
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }
}

/// Reply to a new game request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameResponse {
    pub success: bool,
    pub p1_deck_count: usize,
    pub p2_deck_count: usize,
}

impl NewGameResponse {
    /// A game that could not be started.
    #[must_use]
    pub const fn failed() -> Self {
        Self {
            success: false,
            p1_deck_count: 0,
            p2_deck_count: 0,
        }
    }
}
