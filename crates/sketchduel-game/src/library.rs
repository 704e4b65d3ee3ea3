//! Canonical reference drawings, looked up by title.

use std::collections::HashMap;
use std::sync::Arc;

use sketchduel_protocol::{Pixel, ShapeTitle};

/// Source of the precomputed pixel set for each reference figure.
///
/// The drawings themselves are assets owned by the host. The game layer
/// only asks for them when a round is dealt.
pub trait ShapeLibrary: Send + Sync {
    /// Returns the canonical drawing for `title`. A title the library has
    /// no asset for yields an empty drawing.
    fn reference_pixels(&self, title: ShapeTitle) -> Vec<Pixel>;
}

/// One library shared by every area in the process.
impl<L: ShapeLibrary + ?Sized> ShapeLibrary for Arc<L> {
    fn reference_pixels(&self, title: ShapeTitle) -> Vec<Pixel> {
        (**self).reference_pixels(title)
    }
}

/// A [`ShapeLibrary`] backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct StaticShapeLibrary {
    drawings: HashMap<ShapeTitle, Vec<Pixel>>,
}

impl StaticShapeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, title: ShapeTitle, pixels: impl Into<Vec<Pixel>>) -> Self {
        self.insert(title, pixels);
        self
    }

    pub fn insert(&mut self, title: ShapeTitle, pixels: impl Into<Vec<Pixel>>) {
        self.drawings.insert(title, pixels.into());
    }

    pub fn len(&self) -> usize {
        self.drawings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty()
    }
}

impl ShapeLibrary for StaticShapeLibrary {
    fn reference_pixels(&self, title: ShapeTitle) -> Vec<Pixel> {
        self.drawings.get(&title).cloned().unwrap_or_default()
    }
}
