//! The state machine for a single two-player drawing match.
//!
//! ```text
//!                 join (2nd seat)       start              budget <= 0
//! WAITING_TO_START ────────────→ IN_PROGRESS ──────→ GAME_STARTED ──────────→ OVER
//!        ↑    │                       │                    │
//!        └────┘ leave (solo)          └──── leave ─────────┴──── leave ──────→ OVER
//! ```
//!
//! Every operation validates first and mutates last. An `Err` return means
//! the session is exactly as it was before the call.

use std::time::Duration;

use sketchduel_protocol::{Difficulty, Move, PlayerId, PlayerSlot, SessionId, SessionStatus, SessionView};

use crate::{GameError, RoundSetup, Shape, ShapeDealer};

/// One match: two seats, a configured round, a lazily drained time budget
/// and, once over, a frozen result.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    id: SessionId,
    status: SessionStatus,
    player1: Option<PlayerId>,
    player2: Option<PlayerId>,
    difficulty: Difficulty,
    round_budget_secs: f64,
    /// Budget restored when a lone player walks away.
    default_budget_secs: f64,
    /// Clock reading at the last budget update. Set by `start`.
    last_timestamp: Option<Duration>,
    reference: Option<Shape>,
    player1_shape: Option<Shape>,
    player2_shape: Option<Shape>,
    player1_accuracy: Option<f64>,
    player2_accuracy: Option<f64>,
    winner: Option<PlayerId>,
}

impl GameSession {
    /// An empty match at the default difficulty with no round dealt yet.
    pub fn new(id: SessionId, default_budget_secs: f64) -> Self {
        Self {
            id,
            status: SessionStatus::WaitingToStart,
            player1: None,
            player2: None,
            difficulty: Difficulty::default(),
            round_budget_secs: default_budget_secs,
            default_budget_secs,
            last_timestamp: None,
            reference: None,
            player1_shape: None,
            player2_shape: None,
            player1_accuracy: None,
            player2_accuracy: None,
            winner: None,
        }
    }

    // -- Accessors ---------------------------------------------------------

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn player1(&self) -> Option<PlayerId> {
        self.player1
    }

    pub fn player2(&self) -> Option<PlayerId> {
        self.player2
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn round_budget_secs(&self) -> f64 {
        self.round_budget_secs
    }

    pub fn last_timestamp(&self) -> Option<Duration> {
        self.last_timestamp
    }

    pub fn reference(&self) -> Option<&Shape> {
        self.reference.as_ref()
    }

    pub fn player1_shape(&self) -> Option<&Shape> {
        self.player1_shape.as_ref()
    }

    pub fn player2_shape(&self) -> Option<&Shape> {
        self.player2_shape.as_ref()
    }

    pub fn player1_accuracy(&self) -> Option<f64> {
        self.player1_accuracy
    }

    pub fn player2_accuracy(&self) -> Option<f64> {
        self.player2_accuracy
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// The seat `player` occupies, if any.
    pub fn slot_of(&self, player: PlayerId) -> Option<PlayerSlot> {
        if self.player1 == Some(player) {
            Some(PlayerSlot::One)
        } else if self.player2 == Some(player) {
            Some(PlayerSlot::Two)
        } else {
            None
        }
    }

    pub fn has_player(&self, player: PlayerId) -> bool {
        self.slot_of(player).is_some()
    }

    // -- Transitions -------------------------------------------------------

    /// Seats `player` in the first open slot.
    ///
    /// Filling the second seat moves the match to `IN_PROGRESS` and deals a
    /// fresh round at the current difficulty.
    ///
    /// # Errors
    /// - [`GameError::PlayerAlreadyInSession`] if `player` already has a seat.
    /// - [`GameError::SessionFull`] if both seats belong to others.
    pub fn join(
        &mut self,
        player: PlayerId,
        dealer: &mut ShapeDealer,
    ) -> Result<PlayerSlot, GameError> {
        if self.has_player(player) {
            return Err(GameError::PlayerAlreadyInSession(player, self.id));
        }
        if self.player1.is_some() && self.player2.is_some() {
            return Err(GameError::SessionFull(self.id));
        }
        if self.status != SessionStatus::WaitingToStart {
            return Err(self.invalid_status("join"));
        }

        let slot = if self.player1.is_none() {
            self.player1 = Some(player);
            PlayerSlot::One
        } else {
            let setup = dealer.deal(self.difficulty);
            self.player2 = Some(player);
            self.apply_setup(setup);
            self.status = SessionStatus::InProgress;
            PlayerSlot::Two
        };

        tracing::info!(session_id = %self.id, %player, %slot, status = %self.status, "player joined");
        Ok(slot)
    }

    /// Installs a freshly dealt round: new reference, both player shapes
    /// emptied, budget reset to the tier's base value.
    ///
    /// # Errors
    /// [`GameError::InvalidStatus`] once the timer has started or the match
    /// is over.
    pub fn configure(&mut self, setup: RoundSetup) -> Result<(), GameError> {
        self.check_configurable()?;
        self.apply_setup(setup);
        tracing::info!(
            session_id = %self.id,
            difficulty = %self.difficulty,
            budget = self.round_budget_secs,
            "round configured"
        );
        Ok(())
    }

    /// Whether [`configure`](Self::configure) would accept a round now.
    ///
    /// # Errors
    /// [`GameError::InvalidStatus`] once the timer has started or the match
    /// is over.
    pub fn check_configurable(&self) -> Result<(), GameError> {
        match self.status {
            SessionStatus::WaitingToStart | SessionStatus::InProgress => Ok(()),
            SessionStatus::GameStarted | SessionStatus::Over => {
                Err(self.invalid_status("set difficulty"))
            }
        }
    }

    /// Starts the round timer at `now`.
    ///
    /// # Errors
    /// [`GameError::InvalidStatus`] unless both seats are filled and the
    /// timer has not started yet.
    pub fn start(&mut self, now: Duration) -> Result<(), GameError> {
        if self.status != SessionStatus::InProgress {
            return Err(self.invalid_status("start"));
        }
        self.last_timestamp = Some(now);
        self.status = SessionStatus::GameStarted;
        tracing::info!(session_id = %self.id, budget = self.round_budget_secs, "round started");
        Ok(())
    }

    /// Replaces the drawing for the seat named in `submission` and charges
    /// the time since the last update to the round budget.
    ///
    /// When the budget reaches zero or below, both drawings are scored
    /// against the reference, the winner is fixed and the match is over.
    /// Player 1 wins only with a strictly higher accuracy, so a tie goes to
    /// player 2.
    ///
    /// The seat comes from the move itself, not from who sent it.
    ///
    /// # Errors
    /// - [`GameError::ShapeNotConfigured`] if no round was ever dealt.
    /// - [`GameError::InvalidStatus`] unless the timer is running.
    pub fn apply_move(&mut self, submission: Move, now: Duration) -> Result<(), GameError> {
        let (Some(reference), Some(shape1), Some(shape2)) =
            (&self.reference, &self.player1_shape, &self.player2_shape)
        else {
            return Err(GameError::ShapeNotConfigured(self.id));
        };
        if self.status != SessionStatus::GameStarted {
            return Err(self.invalid_status("submit pixels"));
        }

        let mut shape1 = shape1.clone();
        let mut shape2 = shape2.clone();
        match submission.player_slot {
            PlayerSlot::One => shape1.add_pixels(submission.pixels),
            PlayerSlot::Two => shape2.add_pixels(submission.pixels),
        }

        let since = self.last_timestamp.unwrap_or(now);
        let elapsed = now.saturating_sub(since).as_secs_f64();
        let budget = self.round_budget_secs - elapsed;

        let scores = if budget <= 0.0 {
            Some((reference.accuracy(&shape1)?, reference.accuracy(&shape2)?))
        } else {
            None
        };

        self.player1_shape = Some(shape1);
        self.player2_shape = Some(shape2);
        self.round_budget_secs = budget;
        self.last_timestamp = Some(now);

        tracing::debug!(
            session_id = %self.id,
            slot = %submission.player_slot,
            elapsed,
            budget,
            "pixels submitted"
        );

        if let Some((accuracy1, accuracy2)) = scores {
            self.player1_accuracy = Some(accuracy1);
            self.player2_accuracy = Some(accuracy2);
            self.winner = if accuracy1 > accuracy2 {
                self.player1
            } else {
                self.player2
            };
            self.status = SessionStatus::Over;
            tracing::info!(
                session_id = %self.id,
                accuracy1,
                accuracy2,
                winner = ?self.winner,
                "round over"
            );
        }
        Ok(())
    }

    /// Removes `player` from the match.
    ///
    /// A lone player leaving resets the session to a fresh, empty
    /// `WAITING_TO_START`. With both seats filled, the match ends and the
    /// player who stayed wins, whatever the drawings look like.
    ///
    /// # Errors
    /// - [`GameError::PlayerNotInSession`] if `player` holds no seat.
    /// - [`GameError::InvalidStatus`] once the match is over.
    pub fn leave(&mut self, player: PlayerId) -> Result<(), GameError> {
        let Some(slot) = self.slot_of(player) else {
            return Err(GameError::PlayerNotInSession(player, self.id));
        };
        if self.is_over() {
            return Err(self.invalid_status("leave"));
        }

        if self.player2.is_none() {
            *self = Self::new(self.id, self.default_budget_secs);
            tracing::info!(session_id = %self.id, %player, "last player left, session reset");
            return Ok(());
        }

        self.winner = match slot {
            PlayerSlot::One => self.player2,
            PlayerSlot::Two => self.player1,
        };
        self.status = SessionStatus::Over;
        tracing::info!(
            session_id = %self.id,
            %player,
            winner = ?self.winner,
            "player left, match forfeited"
        );
        Ok(())
    }

    /// Read-only snapshot for observers.
    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            status: self.status,
            player1: self.player1,
            player2: self.player2,
            difficulty: self.difficulty,
            round_budget_secs: self.round_budget_secs,
            reference: self.reference.as_ref().map(Shape::view),
            player1_shape: self.player1_shape.as_ref().map(Shape::view),
            player2_shape: self.player2_shape.as_ref().map(Shape::view),
            player1_accuracy: self.player1_accuracy,
            player2_accuracy: self.player2_accuracy,
            winner: self.winner,
        }
    }

    fn apply_setup(&mut self, setup: RoundSetup) {
        self.difficulty = setup.difficulty;
        self.reference = Some(setup.reference);
        self.player1_shape = Some(setup.player1);
        self.player2_shape = Some(setup.player2);
        self.round_budget_secs = setup.round_budget_secs;
    }

    fn invalid_status(&self, operation: &'static str) -> GameError {
        GameError::InvalidStatus {
            operation,
            status: self.status,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
