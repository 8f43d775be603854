//! Round resolution.
//!
//! `GameSession` owns both seats' piles, the active pool and the state
//! machine:
//!
//! ```text
//!   Running --tie--> War --decisive tie--> War
//!      ^              |
//!      +--decisive----+
//!   any --a player is out of cards--> Ended
//! ```
//!
//! Every request resolves to completion and returns the ordered steps it
//! produced. Nothing is called back into the presentation layer.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::step::{DeckCounts, DrawResponse, NewGameResponse, RoundOutcome, Step};
use crate::cards::{Card, DeckDefinition};
use crate::core::{AnteDisposition, GameRng, GameRngState, Seat, Seats, WarConfig, WarError, WarRules};
use crate::zones::PlayerPiles;

/// Session state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Running,
    /// A tie is unresolved; the next request plays a war sequence.
    War,
    /// Terminal.
    Ended,
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// The other seat ran out of cards.
    Winner(Seat),
    /// Both seats ran out on the same draw.
    Draw,
}

impl GameResult {
    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, seat: Seat) -> bool {
        matches!(self, GameResult::Winner(s) if *s == seat)
    }

    fn from_outcome(outcome: RoundOutcome) -> Self {
        outcome.winner().map_or(GameResult::Draw, GameResult::Winner)
    }
}

/// Totals from driving a session with `play_out`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// `None` if the request cap was hit first.
    pub result: Option<GameResult>,
    /// Draw requests issued.
    pub requests: usize,
    /// Steps produced across all requests.
    pub steps: usize,
    /// Face-up ties, i.e. wars started or extended.
    pub wars: usize,
}

/// One game of War.
///
/// Uses `im` vectors for piles so the whole session clones in O(1).
///
/// ## Example
///
/// ```
/// use war_engine::core::WarConfig;
/// use war_engine::rules::GameSession;
///
/// let mut session = GameSession::new_game(&WarConfig::new(42)).unwrap();
/// assert_eq!(session.deck_counts().p1_deck, 26);
///
/// let response = session.request_next_step().unwrap();
/// assert_eq!(response.steps.len(), 1);
/// assert_eq!(session.card_count(), 52);
/// ```
#[derive(Clone, Debug)]
pub struct GameSession {
    players: Seats<PlayerPiles>,
    active: Vector<Card>,
    state: GameState,
    result: Option<GameResult>,
    rules: WarRules,
    rng: GameRng,
    total_cards: usize,
}

impl GameSession {
    /// Start a game: validate the configured deck, shuffle it once and deal
    /// it alternately, even positions to P1 and odd positions to P2.
    pub fn new_game(config: &WarConfig) -> Result<Self, WarError> {
        Self::deal(&config.deck, config.rules, config.seed)
    }

    /// Deal `deck` with the given rules and seed.
    pub fn deal(deck: &DeckDefinition, rules: WarRules, seed: u64) -> Result<Self, WarError> {
        deck.validate()?;

        let mut rng = GameRng::new(seed);
        let shuffled = rng.shuffled(deck.cards().iter().cloned());

        let mut hands: Seats<Vec<Card>> = Seats::with_default();
        for (i, card) in shuffled.into_iter().enumerate() {
            let seat = if i % 2 == 0 { Seat::P1 } else { Seat::P2 };
            hands[seat].push(card);
        }

        let session = Self::from_parts(
            Seats::new(|seat| PlayerPiles::from_deck(std::mem::take(&mut hands[seat]))),
            rules,
            rng,
        );
        log::info!(
            "new game: {} cards, P1 {} / P2 {}",
            session.total_cards,
            session.players[Seat::P1].deck_len(),
            session.players[Seat::P2].deck_len()
        );
        Ok(session)
    }

    /// Start from fixed draw orders instead of a shuffled deal.
    ///
    /// `seed` still drives reserve shuffles.
    #[must_use]
    pub fn with_decks(p1: Vec<Card>, p2: Vec<Card>, rules: WarRules, seed: u64) -> Self {
        let players = Seats::from_values(PlayerPiles::from_deck(p1), PlayerPiles::from_deck(p2));
        Self::from_parts(players, rules, GameRng::new(seed))
    }

    fn from_parts(players: Seats<PlayerPiles>, rules: WarRules, rng: GameRng) -> Self {
        let total_cards = players.iter().map(|(_, p)| p.total()).sum();
        Self {
            players,
            active: Vector::new(),
            state: GameState::Running,
            result: None,
            rules,
            rng,
            total_cards,
        }
    }

    /// Reply for the presentation layer after a successful deal.
    #[must_use]
    pub fn new_game_response(&self) -> NewGameResponse {
        NewGameResponse {
            success: true,
            p1_deck_count: self.players[Seat::P1].deck_len(),
            p2_deck_count: self.players[Seat::P2].deck_len(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state == GameState::Ended
    }

    /// Final result once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn rules(&self) -> WarRules {
        self.rules
    }

    /// A seat's piles.
    #[must_use]
    pub fn piles(&self, seat: Seat) -> &PlayerPiles {
        &self.players[seat]
    }

    /// Cards currently at stake in an unresolved war.
    #[must_use]
    pub fn active_cards(&self) -> &Vector<Card> {
        &self.active
    }

    /// Current size of all four piles.
    #[must_use]
    pub fn deck_counts(&self) -> DeckCounts {
        let p1 = &self.players[Seat::P1];
        let p2 = &self.players[Seat::P2];
        DeckCounts {
            p1_deck: p1.deck_len(),
            p1_reserve: p1.reserve_len(),
            p2_deck: p2.deck_len(),
            p2_reserve: p2.reserve_len(),
        }
    }

    /// Cards dealt at the start of the game.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Cards currently held across all piles and the active pool.
    ///
    /// Always equal to `total_cards`.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck_counts().total() + self.active.len()
    }

    // === Requests ===

    /// Resolve the next draw.
    ///
    /// In the running state this is a single round. In the war state it is
    /// a war sequence: `ante_count` face-down pairs followed by one decisive
    /// pair. Rejected without mutation once the game has ended.
    pub fn request_next_step(&mut self) -> Result<DrawResponse, WarError> {
        let steps = match self.state {
            GameState::Ended => return Err(WarError::GameOver),
            GameState::Running => {
                let mut steps = SmallVec::new();
                steps.push(self.resolve_round());
                steps
            }
            GameState::War => self.war_sequence(),
        };
        Ok(DrawResponse { steps })
    }

    /// Drive requests until the game ends or `max_requests` is reached.
    pub fn play_out(&mut self, max_requests: usize) -> GameSummary {
        let mut summary = GameSummary {
            result: self.result,
            requests: 0,
            steps: 0,
            wars: 0,
        };

        while summary.requests < max_requests {
            let Ok(response) = self.request_next_step() else {
                break;
            };
            summary.requests += 1;
            summary.steps += response.steps.len();
            summary.wars += response
                .steps
                .iter()
                .filter(|s| s.outcome() == RoundOutcome::War && !s.ignore_step_calculation())
                .count();
        }

        summary.result = self.result;
        summary
    }

    // === Resolution ===

    fn draw_pair(&mut self) -> (Option<Card>, Option<Card>) {
        let p1 = self.players[Seat::P1].draw(&mut self.rng);
        let p2 = self.players[Seat::P2].draw(&mut self.rng);
        log::debug!(
            "drawing: P1 ({}) P2 ({})",
            p1.as_ref().map_or_else(|| "-".to_string(), Card::to_string),
            p2.as_ref().map_or_else(|| "-".to_string(), Card::to_string)
        );
        (p1, p2)
    }

    /// One face-up pair, compared and settled.
    fn resolve_round(&mut self) -> Step {
        let (p1, p2) = match self.draw_pair() {
            (Some(p1), Some(p2)) => (p1, p2),
            (p1, p2) => return self.end_game(p1, p2, false),
        };

        let outcome = if p1.beats(&p2) {
            RoundOutcome::P1Win
        } else if p2.beats(&p1) {
            RoundOutcome::P2Win
        } else {
            RoundOutcome::War
        };

        match outcome.winner() {
            Some(seat) => {
                let pool = std::mem::take(&mut self.active);
                self.players[seat].award([p1.clone(), p2.clone()].into_iter().chain(pool));
                self.state = GameState::Running;
            }
            None => {
                self.active.push_back(p1.clone());
                self.active.push_back(p2.clone());
                self.state = GameState::War;
            }
        }

        Step::new(Some(p1), Some(p2), outcome, false, false, self.deck_counts())
    }

    /// One face-down pair placed under the war.
    fn ante_draw(&mut self) -> Step {
        let (p1, p2) = match self.draw_pair() {
            (Some(p1), Some(p2)) => (p1, p2),
            (p1, p2) => return self.end_game(p1, p2, true),
        };

        match self.rules.ante_disposition {
            AnteDisposition::Pooled => {
                self.active.push_back(p1.clone());
                self.active.push_back(p2.clone());
            }
            AnteDisposition::Returned => {
                self.players[Seat::P1].award([p1.clone()]);
                self.players[Seat::P2].award([p2.clone()]);
            }
        }

        Step::new(Some(p1), Some(p2), RoundOutcome::War, true, false, self.deck_counts())
    }

    fn war_sequence(&mut self) -> SmallVec<[Step; 4]> {
        log::debug!("starting war sequence with {} cards at stake", self.active.len());

        let mut steps = SmallVec::new();
        for _ in 0..self.rules.ante_count {
            let step = self.ante_draw();
            let over = step.is_game_over();
            steps.push(step);
            if over {
                log::debug!("game ended during war sequence");
                return steps;
            }
        }

        log::debug!("drawing decisive cards in war sequence");
        steps.push(self.resolve_round());
        steps
    }

    /// A seat came up empty. Whoever still drew a card puts it back.
    fn end_game(&mut self, p1: Option<Card>, p2: Option<Card>, ignore: bool) -> Step {
        let outcome = match (&p1, &p2) {
            (Some(_), None) => RoundOutcome::P1Win,
            (None, Some(_)) => RoundOutcome::P2Win,
            _ => RoundOutcome::Tie,
        };

        for (seat, card) in [(Seat::P1, &p1), (Seat::P2, &p2)] {
            if let Some(card) = card {
                self.players[seat].return_to_deck(card.clone());
            }
        }

        let result = GameResult::from_outcome(outcome);
        self.state = GameState::Ended;
        self.result = Some(result);
        log::info!("game over: {:?} ({} cards still at stake)", result, self.active.len());

        Step::new(p1, p2, outcome, ignore, true, self.deck_counts())
    }

    // === Snapshots ===

    /// Encode the full session, including the RNG position.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WarError> {
        let snapshot = SessionSnapshot {
            players: self.players.clone(),
            active: self.active.clone(),
            state: self.state,
            result: self.result,
            rules: self.rules,
            rng: self.rng.state(),
            total_cards: self.total_cards,
        };
        Ok(bincode::serialize(&snapshot)?)
    }

    /// Restore a session encoded with `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WarError> {
        let snapshot: SessionSnapshot = bincode::deserialize(bytes)?;
        let session = Self {
            players: snapshot.players,
            active: snapshot.active,
            state: snapshot.state,
            result: snapshot.result,
            rules: snapshot.rules,
            rng: GameRng::from_state(&snapshot.rng),
            total_cards: snapshot.total_cards,
        };

        if session.card_count() != session.total_cards {
            return Err(WarError::Snapshot(format!(
                "snapshot holds {} cards, expected {}",
                session.card_count(),
                session.total_cards
            )));
        }
        Ok(session)
    }
}

#[derive(Serialize, Deserialize)]
struct SessionSnapshot {
    players: Seats<PlayerPiles>,
    active: Vector<Card>,
    state: GameState,
    result: Option<GameResult>,
    rules: WarRules,
    rng: GameRngState,
    total_cards: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    fn card(suit: Suit, value: i32) -> Card {
        Card::new(suit, format!("{:02}", value), value)
    }

    fn hearts(values: &[i32]) -> Vec<Card> {
        values.iter().map(|&v| card(Suit::Heart, v)).collect()
    }

    fn spades(values: &[i32]) -> Vec<Card> {
        values.iter().map(|&v| card(Suit::Spade, v)).collect()
    }

    #[test]
    fn test_deal_parity() {
        let session = GameSession::new_game(&WarConfig::new(42)).unwrap();
        let counts = session.deck_counts();

        assert_eq!(counts.p1_deck, 26);
        assert_eq!(counts.p2_deck, 26);
        assert_eq!(counts.p1_reserve + counts.p2_reserve, 0);
        assert_eq!(session.state(), GameState::Running);
        assert!(session.active_cards().is_empty());
    }

    #[test]
    fn test_deal_odd_deck() {
        let deck = DeckDefinition::new(hearts(&[2, 3, 4, 5, 6]));
        let session = GameSession::deal(&deck, WarRules::default(), 1).unwrap();

        let response = session.new_game_response();
        assert!(response.success);
        assert_eq!(response.p1_deck_count, 3);
        assert_eq!(response.p2_deck_count, 2);
    }

    #[test]
    fn test_deal_rejects_empty_deck() {
        let config = WarConfig::new(1).with_deck(DeckDefinition::default());
        assert_eq!(GameSession::new_game(&config).unwrap_err(), WarError::EmptyDeck);
    }

    #[test]
    fn test_simple_win() {
        let mut session = GameSession::with_decks(hearts(&[10]), spades(&[5]), WarRules::default(), 0);

        let response = session.request_next_step().unwrap();
        assert_eq!(response.steps.len(), 1);

        let step = &response.steps[0];
        assert_eq!(step.outcome(), RoundOutcome::P1Win);
        assert!(!step.is_game_over());
        assert!(!step.ignore_step_calculation());
        assert_eq!(step.counts().p1_reserve, 2);
        assert_eq!(step.counts().p1_deck, 0);
        assert_eq!(session.state(), GameState::Running);

        // P1 replenishes from reserve, P2 is out.
        let response = session.request_next_step().unwrap();
        let step = &response.steps[0];
        assert!(step.is_game_over());
        assert_eq!(step.outcome(), RoundOutcome::P1Win);
        assert!(step.p1_card().is_some());
        assert!(step.p2_card().is_none());
        assert_eq!(step.counts().p1_deck, 2);
        assert_eq!(session.result(), Some(GameResult::Winner(Seat::P1)));
        assert_eq!(session.card_count(), 2);
    }

    #[test]
    fn test_both_out_is_tie() {
        let mut session = GameSession::with_decks(vec![], vec![], WarRules::default(), 0);

        let response = session.request_next_step().unwrap();
        let step = &response.steps[0];

        assert_eq!(step.outcome(), RoundOutcome::Tie);
        assert!(step.is_game_over());
        assert_eq!(session.result(), Some(GameResult::Draw));
    }

    #[test]
    fn test_p1_out_is_p2_win() {
        let mut session = GameSession::with_decks(vec![], spades(&[3]), WarRules::default(), 0);

        let response = session.request_next_step().unwrap();
        assert_eq!(response.steps[0].outcome(), RoundOutcome::P2Win);
        assert_eq!(session.piles(Seat::P2).deck_len(), 1);
    }

    #[test]
    fn test_ended_rejects_requests() {
        let mut session = GameSession::with_decks(vec![], vec![], WarRules::default(), 0);
        session.request_next_step().unwrap();

        let before = session.deck_counts();
        assert_eq!(session.request_next_step().unwrap_err(), WarError::GameOver);
        assert_eq!(session.deck_counts(), before);
        assert!(session.is_over());
    }

    #[test]
    fn test_tie_enters_war() {
        let mut session =
            GameSession::with_decks(hearts(&[7, 9]), spades(&[7, 2]), WarRules::default(), 0);

        let response = session.request_next_step().unwrap();
        assert_eq!(response.steps[0].outcome(), RoundOutcome::War);
        assert_eq!(session.state(), GameState::War);
        assert_eq!(session.active_cards().len(), 2);
    }

    #[test]
    fn test_war_exhaustion_during_ante() {
        let mut session =
            GameSession::with_decks(hearts(&[7, 9]), spades(&[7, 2]), WarRules::default(), 0);
        session.request_next_step().unwrap();

        let response = session.request_next_step().unwrap();
        assert_eq!(response.steps.len(), 2);

        let first = &response.steps[0];
        assert!(first.ignore_step_calculation());
        assert!(!first.is_game_over());
        assert_eq!(first.outcome(), RoundOutcome::War);

        let last = &response.steps[1];
        assert!(last.ignore_step_calculation());
        assert!(last.is_game_over());
        assert_eq!(last.outcome(), RoundOutcome::Tie);

        assert_eq!(session.active_cards().len(), 4);
        assert_eq!(session.card_count(), 4);
    }

    #[test]
    fn test_war_decisive_win_takes_pool() {
        // tie, 3 antes, P2 wins the decisive pair, then one card each left.
        let p1 = hearts(&[5, 2, 3, 4, 6, 10]);
        let p2 = spades(&[5, 9, 9, 9, 8, 3]);
        let mut session = GameSession::with_decks(p1, p2, WarRules::default(), 0);

        session.request_next_step().unwrap();
        let response = session.request_next_step().unwrap();

        assert_eq!(response.steps.len(), 4);
        assert!(response.steps[..3].iter().all(|s| s.ignore_step_calculation()));

        let decisive = &response.steps[3];
        assert!(!decisive.ignore_step_calculation());
        assert_eq!(decisive.outcome(), RoundOutcome::P2Win);
        assert_eq!(decisive.counts().p2_reserve, 10);
        assert!(session.active_cards().is_empty());
        assert_eq!(session.state(), GameState::Running);
    }

    #[test]
    fn test_returned_antes() {
        let rules = WarRules::new().with_ante_disposition(AnteDisposition::Returned);
        let p1 = hearts(&[5, 2, 3, 4, 6]);
        let p2 = spades(&[5, 9, 9, 9, 8]);
        let mut session = GameSession::with_decks(p1, p2, rules, 0);

        session.request_next_step().unwrap();
        let response = session.request_next_step().unwrap();

        let decisive = &response.steps[3];
        assert_eq!(decisive.outcome(), RoundOutcome::P2Win);
        // P2 keeps its own 3 antes and takes the 2 tie cards plus the decisive pair.
        assert_eq!(decisive.counts().p2_reserve, 7);
        assert_eq!(decisive.counts().p1_reserve, 3);
        assert_eq!(session.card_count(), 10);
    }

    #[test]
    fn test_custom_ante_count() {
        let rules = WarRules::new().with_ante_count(1);
        let mut session =
            GameSession::with_decks(hearts(&[5, 2, 9]), spades(&[5, 3, 4]), rules, 0);

        session.request_next_step().unwrap();
        let response = session.request_next_step().unwrap();

        assert_eq!(response.steps.len(), 2);
        assert_eq!(response.steps[1].outcome(), RoundOutcome::P1Win);
        assert_eq!(response.steps[1].counts().p1_reserve, 6);
    }

    #[test]
    fn test_play_out_ends_and_conserves() {
        let mut session = GameSession::new_game(&WarConfig::new(7)).unwrap();
        let summary = session.play_out(100_000);

        assert!(summary.result.is_some());
        assert!(session.is_over());
        assert_eq!(summary.result, session.result());
        assert!(summary.steps >= summary.requests);
        assert_eq!(session.card_count(), 52);
    }

    #[test]
    fn test_play_out_respects_cap() {
        let mut session = GameSession::new_game(&WarConfig::new(7)).unwrap();
        let summary = session.play_out(3);

        assert_eq!(summary.requests, 3);
        assert!(summary.result.is_none() || session.is_over());
    }

    #[test]
    fn test_snapshot_roundtrip_continues_identically() {
        let mut session = GameSession::new_game(&WarConfig::new(11)).unwrap();
        session.play_out(40);

        let bytes = session.to_bytes().unwrap();
        let mut restored = GameSession::from_bytes(&bytes).unwrap();

        assert_eq!(restored.deck_counts(), session.deck_counts());
        assert_eq!(restored.state(), session.state());

        for _ in 0..200 {
            let a = session.request_next_step();
            let b = restored.request_next_step();
            assert_eq!(a, b);
            if a.is_err() {
                break;
            }
        }
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        let err = GameSession::from_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, WarError::Snapshot(_)));
    }
}
