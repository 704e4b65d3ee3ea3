//! Commands a client sends to an area, and what comes back.

use serde::{Deserialize, Serialize};

use crate::{Difficulty, Pixel, PlayerSlot, SessionId};

/// A pixel submission: the complete drawing so far for one seat.
///
/// Clients resend the full drawing on every submission. The session
/// replaces the seat's pixels wholesale, it never appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub player_slot: PlayerSlot,
    pub pixels: Vec<Pixel>,
}

/// Everything a participant can ask an area to do.
///
/// Internally tagged, so `{"type": "StartSession", "session_id": 4}` is a
/// start command. Tags the server does not recognise decode to
/// [`Command::Unknown`] rather than failing, so the dispatcher can answer
/// them with `INVALID_COMMAND`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Take a seat in the current match, creating one if needed.
    JoinSession,

    /// Pick a new difficulty tier and re-deal the reference shape.
    SetDifficulty {
        session_id: SessionId,
        difficulty: Difficulty,
    },

    /// Start the round timer.
    StartSession { session_id: SessionId },

    /// Replace one seat's drawing and advance the round budget.
    SubmitPixels {
        session_id: SessionId,
        #[serde(rename = "move")]
        submission: Move,
    },

    /// Give up the caller's seat.
    LeaveSession { session_id: SessionId },

    #[serde(other)]
    Unknown,
}

impl Command {
    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::JoinSession => "JoinSession",
            Self::SetDifficulty { .. } => "SetDifficulty",
            Self::StartSession { .. } => "StartSession",
            Self::SubmitPixels { .. } => "SubmitPixels",
            Self::LeaveSession { .. } => "LeaveSession",
            Self::Unknown => "Unknown",
        }
    }

    /// The session id the command targets, if it carries one.
    pub fn session_id(&self) -> Option<SessionId> {
        match self {
            Self::SetDifficulty { session_id, .. }
            | Self::StartSession { session_id }
            | Self::SubmitPixels { session_id, .. }
            | Self::LeaveSession { session_id } => Some(*session_id),
            Self::JoinSession | Self::Unknown => None,
        }
    }
}

/// The successful result of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandResponse {
    /// Returned by `JoinSession`: the id of the match that was joined.
    Joined { session_id: SessionId },
    /// Every other command succeeds without a payload.
    Ack,
}
