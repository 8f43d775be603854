//! Game configuration types.
//!
//! A session is configured at startup by providing:
//! - `WarRules`: How war sequences are played
//! - `DeckDefinition`: The source card collection
//! - `WarConfig`: Combines both with the seed and transport latency
//!
//! All config types derive `serde` so they can be loaded from JSON.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::WarError;
use crate::cards::DeckDefinition;

/// Where the face-down ante cards of a war sequence go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnteDisposition {
    /// Antes join the active pool and go to the decisive winner.
    #[default]
    Pooled,
    /// Each ante card goes straight back to its owner's reserve.
    Returned,
}

/// Rules for war sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarRules {
    /// Face-down pairs drawn before the decisive pair.
    pub ante_count: usize,

    /// What happens to ante cards.
    pub ante_disposition: AnteDisposition,
}

impl Default for WarRules {
    fn default() -> Self {
        Self {
            ante_count: 3,
            ante_disposition: AnteDisposition::Pooled,
        }
    }
}

impl WarRules {
    /// Create the standard rules (3 pooled antes).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of ante pairs per war sequence.
    #[must_use]
    pub fn with_ante_count(mut self, count: usize) -> Self {
        self.ante_count = count;
        self
    }

    /// Set where ante cards go.
    #[must_use]
    pub fn with_ante_disposition(mut self, disposition: AnteDisposition) -> Self {
        self.ante_disposition = disposition;
        self
    }
}

/// Complete session configuration.
///
/// ## Example
///
/// ```
/// use war_engine::core::{WarConfig, WarRules};
///
/// let config = WarConfig::from_json(r#"{ "seed": 7, "ping_delay_ms": 0 }"#).unwrap();
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.rules, WarRules::default());
/// assert_eq!(config.deck.len(), 52);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WarConfig {
    /// Seed for every shuffle in the session.
    pub seed: u64,

    /// Artificial latency before each draw response, in milliseconds.
    pub ping_delay_ms: u64,

    /// War sequence rules.
    pub rules: WarRules,

    /// Source card collection dealt at every new game.
    pub deck: DeckDefinition,
}

impl Default for WarConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            ping_delay_ms: 0,
            rules: WarRules::default(),
            deck: DeckDefinition::standard(),
        }
    }
}

impl WarConfig {
    /// Create a config for the standard deck with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, WarError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the source card collection.
    #[must_use]
    pub fn with_deck(mut self, deck: DeckDefinition) -> Self {
        self.deck = deck;
        self
    }

    /// Set the war rules.
    #[must_use]
    pub fn with_rules(mut self, rules: WarRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set the artificial response latency.
    #[must_use]
    pub fn with_ping_delay(mut self, delay: Duration) -> Self {
        self.ping_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// The artificial response latency.
    #[must_use]
    pub fn ping_delay(&self) -> Duration {
        Duration::from_millis(self.ping_delay_ms)
    }
}
