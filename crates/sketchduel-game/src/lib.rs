//! Game rules for Sketchduel.
//!
//! Two players are shown the same reference figure and try to reproduce it
//! before the round budget runs out. This crate owns everything about a
//! single match and nothing about transport or concurrency.
//!
//! # Key types
//!
//! - [`Shape`]: a titled pixel drawing, scored with [`Shape::accuracy`]
//! - [`GameSession`]: the per-match state machine
//! - [`DifficultyCatalog`]: candidate figures and base budget per tier
//! - [`ShapeDealer`]: turns a difficulty into a [`RoundSetup`]
//! - [`ShapeLibrary`], [`ShapePicker`], [`Clock`]: injected collaborators

mod catalog;
mod clock;
mod dealer;
mod error;
mod library;
mod picker;
mod session;
mod shape;

pub use catalog::{DifficultyCatalog, DifficultyTier};
pub use clock::{Clock, ManualClock, SystemClock};
pub use dealer::{RoundSetup, ShapeDealer};
pub use error::{CatalogError, GameError};
pub use library::{ShapeLibrary, StaticShapeLibrary};
pub use picker::{RandomPicker, ShapePicker};
pub use session::GameSession;
pub use shape::Shape;
