//! Wire vocabulary for Sketchduel.
//!
//! This crate defines what clients and the server exchange:
//!
//! - **Types** ([`PlayerId`], [`SessionId`], [`Pixel`], [`Difficulty`],
//!   [`SessionStatus`], ...) shared by every layer.
//! - **Commands** ([`Command`], [`Move`], [`CommandResponse`]) that
//!   participants send to an area.
//! - **Snapshots** ([`AreaSnapshot`], [`SessionView`], [`HistoryEntry`])
//!   broadcast to observers after each successful command.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) for turning all of the
//!   above into bytes.
//!
//! It knows nothing about game rules. The game and area crates build on
//! these types.

mod codec;
mod command;
mod error;
mod snapshot;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use command::{Command, CommandResponse, Move};
pub use error::ProtocolError;
pub use snapshot::{AreaSnapshot, HistoryEntry, PlayerScore, SessionView, ShapeView};
pub use types::{
    AreaId, Difficulty, ErrorCode, Pixel, PlayerId, PlayerSlot, SessionId, SessionStatus,
    ShapeTitle,
};
