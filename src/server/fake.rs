//! Local stand-in for a game server.
//!
//! `FakeServer` owns the configuration and the current session and answers
//! the two boundary requests. Requests are single-flight: while a draw
//! response is still held by the caller (being played back), further draw
//! requests are dropped with `WarError::Busy`.

use std::cell::{Cell, RefCell};
use std::ops::Deref;

use crate::core::{WarConfig, WarError};
use crate::rules::{DrawResponse, GameSession, NewGameResponse};

/// Request/response boundary around a `GameSession`.
///
/// ## Usage
///
/// ```
/// use war_engine::core::{WarConfig, WarError};
/// use war_engine::server::FakeServer;
///
/// let server = FakeServer::new(WarConfig::new(3));
/// assert_eq!(server.request_next_step().unwrap_err(), WarError::NoSession);
///
/// assert!(server.new_game().success);
///
/// let draw = server.request_next_step().unwrap();
/// assert_eq!(server.request_next_step().unwrap_err(), WarError::Busy);
///
/// let steps = draw.into_response().steps;
/// assert_eq!(steps.len(), 1);
/// assert!(server.request_next_step().is_ok());
/// ```
#[derive(Debug)]
pub struct FakeServer {
    config: WarConfig,
    session: RefCell<Option<GameSession>>,
    busy: Cell<bool>,
}

impl FakeServer {
    /// Create a server with no game running.
    #[must_use]
    pub fn new(config: WarConfig) -> Self {
        Self {
            config,
            session: RefCell::new(None),
            busy: Cell::new(false),
        }
    }

    #[must_use]
    pub fn config(&self) -> &WarConfig {
        &self.config
    }

    /// Deal a fresh game, replacing any current one.
    ///
    /// An invalid configured deck leaves no session behind and reports
    /// `success = false`.
    pub fn new_game(&self) -> NewGameResponse {
        let Ok(mut slot) = self.session.try_borrow_mut() else {
            log::warn!("new game request dropped: session in use");
            return NewGameResponse::failed();
        };

        match GameSession::new_game(&self.config) {
            Ok(session) => {
                let response = session.new_game_response();
                *slot = Some(session);
                response
            }
            Err(err) => {
                log::warn!("new game rejected: {}", err);
                *slot = None;
                NewGameResponse::failed()
            }
        }
    }

    /// Resolve the next draw.
    ///
    /// Waits for the configured ping delay first. The returned `InFlight`
    /// keeps the gate closed until it is dropped or consumed.
    pub fn request_next_step(&self) -> Result<InFlight<'_>, WarError> {
        let gate = BusyGuard::acquire(&self.busy).ok_or_else(|| {
            log::warn!("draw request dropped: previous draw still in flight");
            WarError::Busy
        })?;

        let delay = self.config.ping_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let response = {
            let mut slot = self.session.try_borrow_mut().map_err(|_| WarError::Busy)?;
            let session = slot.as_mut().ok_or(WarError::NoSession)?;
            session.request_next_step()?
        };

        Ok(InFlight {
            response,
            _gate: gate,
        })
    }

    /// Check whether a draw is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Check whether the current game has ended. `false` with no session.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.with_session(GameSession::is_over).unwrap_or(false)
    }

    /// Read the current session, if any.
    pub fn with_session<R>(&self, f: impl FnOnce(&GameSession) -> R) -> Option<R> {
        let slot = self.session.try_borrow().ok()?;
        slot.as_ref().map(f)
    }
}

/// A draw response that is still being played back.
///
/// Derefs to the `DrawResponse`. The server accepts the next draw once this
/// is dropped.
#[derive(Debug)]
pub struct InFlight<'a> {
    response: DrawResponse,
    _gate: BusyGuard<'a>,
}

impl InFlight<'_> {
    /// Finish playback and take the response, reopening the gate.
    #[must_use]
    pub fn into_response(self) -> DrawResponse {
        self.response
    }
}

impl Deref for InFlight<'_> {
    type Target = DrawResponse;

    fn deref(&self) -> &Self::Target {
        &self.response
    }
}

/// Holds the busy flag set; clears it on drop.
#[derive(Debug)]
struct BusyGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self { flag })
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
