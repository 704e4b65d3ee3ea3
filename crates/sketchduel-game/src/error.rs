//! Error types for the game layer.

use sketchduel_protocol::{Difficulty, ErrorCode, PlayerId, SessionId, SessionStatus, ShapeTitle};

/// A precondition a session or shape operation refused to violate.
///
/// Every variant is raised before any state is touched, so a caller that
/// receives one can rely on the session being exactly as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    /// The participant already holds one of the two seats.
    #[error("player {0} already in session {1}")]
    PlayerAlreadyInSession(PlayerId, SessionId),

    /// The participant holds neither seat.
    #[error("player {0} not in session {1}")]
    PlayerNotInSession(PlayerId, SessionId),

    /// Both seats are taken by other participants.
    #[error("session {0} already has two players")]
    SessionFull(SessionId),

    /// A move arrived before any difficulty was dealt.
    #[error("session {0} has no shapes configured")]
    ShapeNotConfigured(SessionId),

    /// The operation is not allowed in the session's current status.
    #[error("cannot {operation} while session is {status}")]
    InvalidStatus {
        operation: &'static str,
        status: SessionStatus,
    },

    /// Two shapes of different figures or tiers were compared.
    #[error("cannot compare {left}/{left_difficulty} with {right}/{right_difficulty}")]
    ShapeMismatch {
        left: ShapeTitle,
        left_difficulty: Difficulty,
        right: ShapeTitle,
        right_difficulty: Difficulty,
    },
}

impl GameError {
    /// The wire code reported to the acting client.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::PlayerAlreadyInSession(..) => ErrorCode::PlayerAlreadyInSession,
            Self::PlayerNotInSession(..) => ErrorCode::PlayerNotInSession,
            Self::SessionFull(_) => ErrorCode::SessionFull,
            Self::ShapeNotConfigured(_) => ErrorCode::ShapeNotConfigured,
            Self::InvalidStatus { .. } => ErrorCode::InvalidStatus,
            Self::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
        }
    }
}

/// A difficulty catalog that can't be used to deal rounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// A tier lists no candidate shapes, so nothing could be picked.
    #[error("difficulty {0} has no candidate shapes")]
    EmptyTier(Difficulty),

    /// A tier's round budget is zero, negative, or not a number.
    #[error("difficulty {difficulty} has invalid round budget {secs}")]
    InvalidBudget { difficulty: Difficulty, secs: f64 },
}
