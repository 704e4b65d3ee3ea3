//! Unified error type for Sketchduel.

use sketchduel_area::{AreaError, ConfigError};
use sketchduel_game::{CatalogError, GameError};
use sketchduel_protocol::{ErrorCode, ProtocolError};

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum SketchDuelError {
    /// Encode, decode or invalid message.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session or shape precondition failed.
    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Routing, area lookup, or a stopped area actor.
    #[error(transparent)]
    Area(#[from] AreaError),
}

impl SketchDuelError {
    /// The wire code for errors a participant can cause, `None` for
    /// host-side configuration problems.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Protocol(_) => Some(ErrorCode::InvalidCommand),
            Self::Game(err) => Some(err.code()),
            Self::Area(err) => Some(err.code()),
            Self::Catalog(_) | Self::Config(_) => None,
        }
    }
}
