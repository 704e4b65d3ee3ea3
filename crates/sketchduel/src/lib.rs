//! # Sketchduel
//!
//! Server-side engine for a two-player drawing duel hosted in a shared
//! space. Two participants try to reproduce the same reference figure
//! before the round budget runs out; everyone else in the area watches.
//!
//! The work is split across crates, re-exported here:
//!
//! - [`protocol`]: commands, snapshots, codecs
//! - [`game`]: shapes, scoring, the match state machine
//! - [`area`]: per-area actors, command dispatch, history
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sketchduel::prelude::*;
//!
//! # async fn run() -> Result<(), SketchDuelError> {
//! sketchduel::init_tracing();
//!
//! let library = StaticShapeLibrary::new()
//!     .with(ShapeTitle::Circle, [Pixel::new(0, 0), Pixel::new(1, 1)]);
//! let mut areas = AreaManager::new(
//!     AreaConfig::default(),
//!     Arc::new(library),
//!     Arc::new(SystemClock::new()),
//! )?;
//! let area = areas.create_area();
//!
//! let alice = Participant::new(PlayerId(1), "Alice");
//! areas.handle(area, Command::JoinSession, alice).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod telemetry;

pub use error::SketchDuelError;
pub use telemetry::{init_tracing, init_tracing_with_default};

pub use sketchduel_area as area;
pub use sketchduel_game as game;
pub use sketchduel_protocol as protocol;

/// Everything needed to host areas and drive matches.
pub mod prelude {
    pub use crate::SketchDuelError;

    pub use sketchduel_protocol::{
        AreaId, AreaSnapshot, Codec, Command, CommandResponse, Difficulty, ErrorCode,
        HistoryEntry, JsonCodec, Move, Pixel, PlayerId, PlayerScore, PlayerSlot, SessionId,
        SessionStatus, SessionView, ShapeTitle, ShapeView,
    };

    pub use sketchduel_game::{
        Clock, DifficultyCatalog, DifficultyTier, GameSession, ManualClock, RandomPicker, Shape,
        ShapeDealer, ShapeLibrary, ShapePicker, StaticShapeLibrary, SystemClock,
    };

    pub use sketchduel_area::{
        AreaConfig, AreaHandle, AreaManager, AreaObserver, LeaderboardRow, Participant,
        SessionDispatcher,
    };
}
