//! Deals rounds: picks a reference figure for a tier and allocates fresh
//! player shapes for it.

use std::fmt;

use sketchduel_protocol::Difficulty;

use crate::{DifficultyCatalog, Shape, ShapeLibrary, ShapePicker};

/// Everything a session needs to (re)configure a round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSetup {
    pub difficulty: Difficulty,
    pub reference: Shape,
    pub player1: Shape,
    pub player2: Shape,
    pub round_budget_secs: f64,
}

/// Owns the catalog, the drawing assets and the random source, and turns a
/// difficulty into a [`RoundSetup`].
pub struct ShapeDealer {
    catalog: DifficultyCatalog,
    library: Box<dyn ShapeLibrary>,
    picker: Box<dyn ShapePicker>,
}

impl ShapeDealer {
    /// `catalog` must already be validated.
    pub fn new(
        catalog: DifficultyCatalog,
        library: impl ShapeLibrary + 'static,
        picker: impl ShapePicker + 'static,
    ) -> Self {
        Self {
            catalog,
            library: Box::new(library),
            picker: Box::new(picker),
        }
    }

    pub fn catalog(&self) -> &DifficultyCatalog {
        &self.catalog
    }

    /// Picks a figure for `difficulty` and builds the round around it.
    ///
    /// The two player shapes are separate allocations, so a submission for
    /// one seat can never show up in the other.
    pub fn deal(&mut self, difficulty: Difficulty) -> RoundSetup {
        let title = self.picker.pick(self.catalog.titles(difficulty));
        let reference = Shape::new(title, difficulty, self.library.reference_pixels(title));

        tracing::debug!(%difficulty, %title, pixels = reference.pixels().len(), "round dealt");

        RoundSetup {
            difficulty,
            reference,
            player1: Shape::empty(title, difficulty),
            player2: Shape::empty(title, difficulty),
            round_budget_secs: self.catalog.round_budget_secs(difficulty),
        }
    }
}

impl fmt::Debug for ShapeDealer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeDealer")
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}
