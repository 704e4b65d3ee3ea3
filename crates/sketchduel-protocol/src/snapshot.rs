//! Read-only views broadcast to observers after every successful command.
//!
//! Nothing here is mutable state. The game and area layers build these
//! snapshots from their own structures so observers can be serialized to
//! without borrowing engine internals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AreaId, Difficulty, Pixel, PlayerId, SessionId, SessionStatus, ShapeTitle};

/// A shape as observers see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeView {
    pub title: ShapeTitle,
    pub difficulty: Difficulty,
    pub pixels: Vec<Pixel>,
}

/// The observable state of one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub status: SessionStatus,
    pub player1: Option<PlayerId>,
    pub player2: Option<PlayerId>,
    pub difficulty: Difficulty,
    /// Seconds left in the round. Negative once a late submission ended it.
    pub round_budget_secs: f64,
    pub reference: Option<ShapeView>,
    pub player1_shape: Option<ShapeView>,
    pub player2_shape: Option<ShapeView>,
    /// Set only when the round was scored.
    pub player1_accuracy: Option<f64>,
    pub player2_accuracy: Option<f64>,
    pub winner: Option<PlayerId>,
}

/// One participant's line in a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    /// `1` for the winner, `0` otherwise.
    pub win: u8,
    pub accuracy: f64,
}

/// A finished match, keyed by participant display name.
///
/// `BTreeMap` keeps the serialized order stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub session_id: SessionId,
    pub difficulty: Difficulty,
    pub scores: BTreeMap<String, PlayerScore>,
}

/// Everything an observer of an area receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSnapshot {
    pub area_id: AreaId,
    pub session: Option<SessionView>,
    pub history: Vec<HistoryEntry>,
}
