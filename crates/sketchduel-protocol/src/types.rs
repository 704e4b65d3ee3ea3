//! Core vocabulary shared by every layer of Sketchduel.
//!
//! These are the small value types that travel on the wire and that the
//! game and area layers use as identifiers: who is playing, which match,
//! which area, what a pixel is, which figure is being drawn and how hard
//! the round is.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A stable identifier for a participant, provided by the host's
/// participant registry.
///
/// Newtype over `u64` so a `PlayerId` can never be passed where a
/// `SessionId` is expected. `#[serde(transparent)]` keeps the JSON form a
/// plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// Identifies one match (a game session) inside an area.
///
/// A new id is minted every time the dispatcher replaces its session, so a
/// stale id from a previous match never matches the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

/// Identifies an interactable area that hosts drawing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(pub u64);

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Pixel
// ---------------------------------------------------------------------------

/// A single canvas coordinate.
///
/// Clients send scaled pointer positions, so coordinates are fractional.
/// Pixels compare by exact coordinate equality, which is what accuracy
/// scoring relies on. `-0.0` and `0.0` are the same pixel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
}

impl Pixel {
    pub fn new(x: impl Into<f64>, y: impl Into<f64>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    fn key(&self) -> (u64, u64) {
        // Adding 0.0 folds -0.0 into 0.0.
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl PartialEq for Pixel {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pixel {}

impl std::hash::Hash for Pixel {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(i32, i32)> for Pixel {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<(f64, f64)> for Pixel {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// ShapeTitle
// ---------------------------------------------------------------------------

/// The figures a reference shape can depict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShapeTitle {
    Circle,
    Square,
    Star,
    Umbrella,
    House,
    #[serde(rename = "Christmas Tree")]
    ChristmasTree,
    Helicopter,
    Car,
    Husky,
}

impl ShapeTitle {
    /// Every supported title, in catalog order.
    pub const ALL: [ShapeTitle; 9] = [
        Self::Circle,
        Self::Square,
        Self::Star,
        Self::Umbrella,
        Self::House,
        Self::ChristmasTree,
        Self::Helicopter,
        Self::Car,
        Self::Husky,
    ];
}

impl fmt::Display for ShapeTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Circle => "Circle",
            Self::Square => "Square",
            Self::Star => "Star",
            Self::Umbrella => "Umbrella",
            Self::House => "House",
            Self::ChristmasTree => "Christmas Tree",
            Self::Helicopter => "Helicopter",
            Self::Car => "Car",
            Self::Husky => "Husky",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// A difficulty tier. Selects the candidate reference shapes and the base
/// round budget. `Easy` is the default for every new match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerSlot
// ---------------------------------------------------------------------------

/// Which seat a submission is for. Encoded as `1` or `2` on the wire.
///
/// Moves are routed by this tag, not by the identity of the sender, so an
/// observer can relay a drawing on behalf of either seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerSlot {
    One,
    Two,
}

impl TryFrom<u8> for PlayerSlot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(format!("player slot must be 1 or 2, got {other}")),
        }
    }
}

impl From<PlayerSlot> for u8 {
    fn from(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a single match.
///
/// ```text
/// WAITING_TO_START → IN_PROGRESS → GAME_STARTED → OVER
/// ```
///
/// - **WaitingToStart**: zero or one participant seated.
/// - **InProgress**: both seats filled, round configured, timer idle.
/// - **GameStarted**: timer running, submissions are scored.
/// - **Over**: terminal. Winner is decided and the state is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    #[default]
    WaitingToStart,
    InProgress,
    GameStarted,
    Over,
}

impl SessionStatus {
    /// Returns `true` once the match has ended.
    pub fn is_over(&self) -> bool {
        matches!(self, Self::Over)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WaitingToStart => write!(f, "WAITING_TO_START"),
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::GameStarted => write!(f, "GAME_STARTED"),
            Self::Over => write!(f, "OVER"),
        }
    }
}

// ---------------------------------------------------------------------------
// ErrorCode
// ---------------------------------------------------------------------------

/// Machine-readable error kinds reported back to the acting client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    PlayerAlreadyInSession,
    PlayerNotInSession,
    SessionFull,
    ShapeNotConfigured,
    ShapeMismatch,
    InvalidStatus,
    GameNotInProgress,
    GameIdMismatch,
    InvalidCommand,
    AreaUnavailable,
    AreaNotFound,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reuse the serde name so logs and wire agree.
        let name = match self {
            Self::PlayerAlreadyInSession => "PLAYER_ALREADY_IN_SESSION",
            Self::PlayerNotInSession => "PLAYER_NOT_IN_SESSION",
            Self::SessionFull => "SESSION_FULL",
            Self::ShapeNotConfigured => "SHAPE_NOT_CONFIGURED",
            Self::ShapeMismatch => "SHAPE_MISMATCH",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::GameNotInProgress => "GAME_NOT_IN_PROGRESS",
            Self::GameIdMismatch => "GAME_ID_MISMATCH",
            Self::InvalidCommand => "INVALID_COMMAND",
            Self::AreaUnavailable => "AREA_UNAVAILABLE",
            Self::AreaNotFound => "AREA_NOT_FOUND",
        };
        f.write_str(name)
    }
}

// =========================================================================
// Tests
// =========================================================================
