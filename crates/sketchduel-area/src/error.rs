//! Error types for the area layer.

use sketchduel_game::{CatalogError, GameError};
use sketchduel_protocol::{AreaId, ErrorCode, ProtocolError, SessionId};

/// Errors returned to the participant whose command failed.
///
/// None of these ever reach observers: a failed command neither broadcasts
/// nor touches the history.
#[derive(Debug, thiserror::Error)]
pub enum AreaError {
    /// The active session refused the command.
    #[error(transparent)]
    Game(#[from] GameError),

    /// A targeted command arrived while the area has no session.
    #[error("no game in progress")]
    GameNotInProgress,

    /// A targeted command named a session other than the active one.
    #[error("command targets session {got}, active session is {expected}")]
    GameIdMismatch { expected: SessionId, got: SessionId },

    /// The command kind is not one the area understands.
    #[error("invalid command")]
    InvalidCommand,

    /// The raw command bytes could not be decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The area's command channel is closed.
    #[error("area {0} is unavailable")]
    Unavailable(AreaId),

    /// The area does not exist.
    #[error("area {0} not found")]
    NotFound(AreaId),
}

impl AreaError {
    /// The wire code reported to the acting client.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Game(err) => err.code(),
            Self::GameNotInProgress => ErrorCode::GameNotInProgress,
            Self::GameIdMismatch { .. } => ErrorCode::GameIdMismatch,
            Self::InvalidCommand | Self::Protocol(_) => ErrorCode::InvalidCommand,
            Self::Unavailable(_) => ErrorCode::AreaUnavailable,
            Self::NotFound(_) => ErrorCode::AreaNotFound,
        }
    }
}

/// An [`AreaConfig`](crate::AreaConfig) that can't be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid area config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A zero-capacity command channel can't be created.
    #[error("channel_size must be at least 1")]
    ZeroChannelSize,
}
