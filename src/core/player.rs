//! Seat identification and per-seat data storage.
//!
//! ## Seat
//!
//! War is strictly a two-player game, so seats are a closed enum rather
//! than an open index.
//!
//! ## Seats
//!
//! Per-seat storage with O(1) access, indexable by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    P1,
    P2,
}

impl Seat {
    /// Both seats, in dealing order.
    pub const ALL: [Seat; 2] = [Seat::P1, Seat::P2];

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Seat::P1 => 0,
            Seat::P2 => 1,
        }
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Seat {
        match self {
            Seat::P1 => Seat::P2,
            Seat::P2 => Seat::P1,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::P1 => write!(f, "P1"),
            Seat::P2 => write!(f, "P2"),
        }
    }
}

/// Per-seat data storage.
///
/// ## Example
///
/// ```
/// use war_engine::core::{Seat, Seats};
///
/// let mut wins: Seats<u32> = Seats::with_default();
/// wins[Seat::P2] += 1;
///
/// assert_eq!(wins[Seat::P1], 0);
/// assert_eq!(wins[Seat::P2], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seats<T> {
    data: [T; 2],
}

impl<T> Seats<T> {
    /// Create with values from a factory function, called for P1 then P2.
    pub fn new(mut factory: impl FnMut(Seat) -> T) -> Self {
        let p1 = factory(Seat::P1);
        let p2 = factory(Seat::P2);
        Self::from_values(p1, p2)
    }

    /// Create from one value per seat.
    #[must_use]
    pub fn from_values(p1: T, p2: T) -> Self {
        Self { data: [p1, p2] }
    }

    /// Create with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        Seat::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Seat> for Seats<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for Seats<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}
