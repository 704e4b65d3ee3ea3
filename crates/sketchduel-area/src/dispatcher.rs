//! Command routing for one area.
//!
//! An area hosts at most one [`GameSession`] at a time. The dispatcher
//! creates sessions on demand, checks that targeted commands name the
//! active session, forwards them, and after every success records finished
//! matches and notifies observers.
//!
//! Nothing here is async or locked: the area actor gives the dispatcher
//! exclusive access, so each command runs to completion before the next.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sketchduel_game::{Clock, GameSession, ShapeDealer};
use sketchduel_protocol::{
    AreaId, AreaSnapshot, Codec, Command, CommandResponse, Difficulty, JsonCodec, PlayerId,
    SessionId,
};

use crate::history::{leaderboard, LeaderboardRow, MatchHistory};
use crate::{AreaError, AreaObserver};

/// Session ids are unique across every area in the process.
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
}

/// The connected actor a command comes from, as known to the host's
/// participant registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: PlayerId,
    pub name: String,
}

impl Participant {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Serializes commands into the area's single active session.
pub struct SessionDispatcher {
    area_id: AreaId,
    active: Option<GameSession>,
    history: MatchHistory,
    dealer: ShapeDealer,
    clock: Arc<dyn Clock>,
    /// Display names of the active session's seated players.
    occupants: HashMap<PlayerId, String>,
    observers: Vec<Box<dyn AreaObserver>>,
}

impl SessionDispatcher {
    pub fn new(area_id: AreaId, dealer: ShapeDealer, clock: Arc<dyn Clock>) -> Self {
        Self {
            area_id,
            active: None,
            history: MatchHistory::new(),
            dealer,
            clock,
            occupants: HashMap::new(),
            observers: Vec::new(),
        }
    }

    pub fn area_id(&self) -> AreaId {
        self.area_id
    }

    pub fn active_session(&self) -> Option<&GameSession> {
        self.active.as_ref()
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        leaderboard(self.history.entries())
    }

    pub fn add_observer(&mut self, observer: impl AreaObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Applies `command` on behalf of `participant`.
    ///
    /// On success, observers receive a fresh snapshot and a session that has
    /// just ended is added to the history. On error nothing changes and
    /// nobody is notified.
    ///
    /// # Errors
    /// - [`AreaError::GameNotInProgress`] for a targeted command with no
    ///   active session.
    /// - [`AreaError::GameIdMismatch`] when the command names another
    ///   session.
    /// - [`AreaError::InvalidCommand`] for an unrecognised command.
    /// - [`AreaError::Game`] when the session rejects the transition.
    pub fn handle(
        &mut self,
        command: Command,
        participant: &Participant,
    ) -> Result<CommandResponse, AreaError> {
        let kind = command.kind();
        let result = self.apply(command, participant);
        match &result {
            Ok(_) => self.state_updated(),
            Err(err) => tracing::debug!(
                area_id = %self.area_id,
                player_id = %participant.id,
                command = kind,
                code = %err.code(),
                "command rejected"
            ),
        }
        result
    }

    /// Decodes a JSON command and applies it like [`handle`](Self::handle).
    ///
    /// # Errors
    /// [`AreaError::Protocol`] if the bytes are not a command, otherwise as
    /// [`handle`](Self::handle).
    pub fn handle_encoded(
        &mut self,
        bytes: &[u8],
        participant: &Participant,
    ) -> Result<CommandResponse, AreaError> {
        let command: Command = JsonCodec.decode(bytes)?;
        self.handle(command, participant)
    }

    /// Current state as observers see it.
    pub fn snapshot(&self) -> AreaSnapshot {
        AreaSnapshot {
            area_id: self.area_id,
            session: self.active.as_ref().map(GameSession::view),
            history: self.history.entries().to_vec(),
        }
    }

    fn apply(
        &mut self,
        command: Command,
        participant: &Participant,
    ) -> Result<CommandResponse, AreaError> {
        match command {
            Command::JoinSession => {
                let session_id = self.join(participant.id)?;
                self.occupants
                    .insert(participant.id, participant.name.clone());
                return Ok(CommandResponse::Joined { session_id });
            }
            Command::SetDifficulty {
                session_id,
                difficulty,
            } => {
                // Reject before dealing so the picker does not advance.
                self.session_mut(session_id)?.check_configurable()?;
                let setup = self.dealer.deal(difficulty);
                self.session_mut(session_id)?.configure(setup)?;
            }
            Command::StartSession { session_id } => {
                let now = self.clock.now();
                self.session_mut(session_id)?.start(now)?;
            }
            Command::SubmitPixels {
                session_id,
                submission,
            } => {
                let now = self.clock.now();
                self.session_mut(session_id)?.apply_move(submission, now)?;
            }
            Command::LeaveSession { session_id } => {
                self.session_mut(session_id)?.leave(participant.id)?;
            }
            Command::Unknown => return Err(AreaError::InvalidCommand),
        }
        Ok(CommandResponse::Ack)
    }

    /// Joins the active session, or a new one if there is none or the last
    /// one is over. A new session is dealt the default difficulty first.
    fn join(&mut self, player: PlayerId) -> Result<SessionId, AreaError> {
        if let Some(session) = self.active.as_mut().filter(|s| !s.is_over()) {
            session.join(player, &mut self.dealer)?;
            return Ok(session.id());
        }

        let mut session =
            GameSession::new(next_session_id(), self.dealer.catalog().default_budget_secs());
        session.configure(self.dealer.deal(Difficulty::default()))?;
        session.join(player, &mut self.dealer)?;
        let session_id = session.id();
        tracing::info!(area_id = %self.area_id, %session_id, "session created");
        self.active = Some(session);
        Ok(session_id)
    }

    fn session_mut(&mut self, session_id: SessionId) -> Result<&mut GameSession, AreaError> {
        let session = self.active.as_mut().ok_or(AreaError::GameNotInProgress)?;
        if session.id() != session_id {
            return Err(AreaError::GameIdMismatch {
                expected: session.id(),
                got: session_id,
            });
        }
        Ok(session)
    }

    /// Records the active session if it just ended, then broadcasts.
    ///
    /// Names are kept only while their player holds a seat. Once a match is
    /// in the history its names are dropped.
    fn state_updated(&mut self) {
        if let Some(session) = &self.active {
            let occupants = &self.occupants;
            self.history.record(session, |player| {
                occupants
                    .get(&player)
                    .cloned()
                    .unwrap_or_else(|| player.to_string())
            });
            if session.is_over() {
                self.occupants.clear();
            } else {
                self.occupants.retain(|player, _| session.has_player(*player));
            }
        }

        let snapshot = self.snapshot();
        self.observers.retain(|observer| !observer.is_closed());
        for observer in &mut self.observers {
            observer.notify(&snapshot);
        }
    }
}

impl fmt::Debug for SessionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionDispatcher")
            .field("area_id", &self.area_id)
            .field("active", &self.active)
            .field("history", &self.history.len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

// =========================================================================
// Tests
// =========================================================================
