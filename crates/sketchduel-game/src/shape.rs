//! Pixel shapes and accuracy scoring.

use std::collections::HashSet;

use sketchduel_protocol::{Difficulty, Pixel, ShapeTitle, ShapeView};

use crate::GameError;

/// A named figure at a difficulty tier, with the pixels drawn for it.
///
/// The same type holds the canonical reference drawing and each player's
/// submission. Pixel order is insertion order and duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    title: ShapeTitle,
    difficulty: Difficulty,
    pixels: Vec<Pixel>,
}

impl Shape {
    pub fn new(title: ShapeTitle, difficulty: Difficulty, pixels: Vec<Pixel>) -> Self {
        Self {
            title,
            difficulty,
            pixels,
        }
    }

    /// A shape with nothing drawn yet.
    pub fn empty(title: ShapeTitle, difficulty: Difficulty) -> Self {
        Self::new(title, difficulty, Vec::new())
    }

    pub fn title(&self) -> ShapeTitle {
        self.title
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Replaces the drawing with `pixels`.
    ///
    /// Clients send everything drawn so far on each submission, so this is
    /// a snapshot swap rather than an append.
    pub fn add_pixels(&mut self, pixels: Vec<Pixel>) {
        self.pixels = pixels;
    }

    /// Scores `submitted` against this shape as the reference.
    ///
    /// Every submitted pixel found in the reference counts as a match,
    /// every other one as a miss:
    ///
    /// ```text
    /// accuracy = (matches - misses) / reference pixel count
    /// ```
    ///
    /// The result is not clamped. Scribbling outside the reference drives
    /// it negative. An empty reference scores `0.0`.
    ///
    /// # Errors
    /// [`GameError::ShapeMismatch`] when the two shapes differ in title or
    /// difficulty.
    pub fn accuracy(&self, submitted: &Shape) -> Result<f64, GameError> {
        if self.title != submitted.title || self.difficulty != submitted.difficulty {
            return Err(GameError::ShapeMismatch {
                left: self.title,
                left_difficulty: self.difficulty,
                right: submitted.title,
                right_difficulty: submitted.difficulty,
            });
        }
        if self.pixels.is_empty() {
            return Ok(0.0);
        }

        let reference: HashSet<Pixel> = self.pixels.iter().copied().collect();
        let matches = submitted
            .pixels
            .iter()
            .filter(|pixel| reference.contains(pixel))
            .count();
        let misses = submitted.pixels.len() - matches;

        Ok((matches as f64 - misses as f64) / self.pixels.len() as f64)
    }

    pub fn view(&self) -> ShapeView {
        ShapeView {
            title: self.title,
            difficulty: self.difficulty,
            pixels: self.pixels.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(points: &[(i32, i32)]) -> Vec<Pixel> {
        points.iter().copied().map(Pixel::from).collect()
    }

    fn square() -> Shape {
        Shape::new(
            ShapeTitle::Square,
            Difficulty::Easy,
            px(&[(3, 3), (3, 4), (3, 5), (4, 4), (5, 5), (9, 10), (3, 1)]),
        )
    }

    #[test]
    fn test_add_pixels_replaces_with_single_pixel() {
        let mut shape = square();
        assert_eq!(shape.pixels().len(), 7);

        shape.add_pixels(px(&[(3, 9)]));

        assert_eq!(shape.pixels(), px(&[(3, 9)]).as_slice());
    }

    #[test]
    fn test_add_pixels_replaces_with_many_pixels() {
        let mut shape = square();
        shape.add_pixels(px(&[(3, 9), (3, 10)]));
        assert_eq!(shape.pixels(), px(&[(3, 9), (3, 10)]).as_slice());
    }

    #[test]
    fn test_accuracy_different_title_returns_error() {
        let other = Shape::new(ShapeTitle::Umbrella, Difficulty::Easy, square().pixels().to_vec());
        let result = square().accuracy(&other);
        assert!(matches!(result, Err(GameError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_accuracy_different_difficulty_returns_error() {
        let other = Shape::new(ShapeTitle::Square, Difficulty::Hard, square().pixels().to_vec());
        assert!(square().accuracy(&other).is_err());
    }

    #[test]
    fn test_accuracy_self_comparison_is_one() {
        let shape = square();
        assert_eq!(shape.accuracy(&shape).unwrap(), 1.0);
    }

    #[test]
    fn test_accuracy_self_comparison_with_duplicates_is_one() {
        let shape = Shape::new(ShapeTitle::Star, Difficulty::Easy, px(&[(1, 1), (1, 1), (2, 2)]));
        assert_eq!(shape.accuracy(&shape).unwrap(), 1.0);
    }

    #[test]
    fn test_accuracy_no_overlap_is_negative() {
        let other = Shape::new(ShapeTitle::Square, Difficulty::Easy, px(&[(0, 0), (0, 1), (0, 2)]));
        let score = square().accuracy(&other).unwrap();
        assert!(score < 0.0);
        assert_eq!(score, -3.0 / 7.0);
    }

    #[test]
    fn test_accuracy_partial_overlap_is_positive() {
        let other = Shape::new(
            ShapeTitle::Square,
            Difficulty::Easy,
            px(&[(0, 0), (0, 1), (0, 2), (3, 3), (3, 4), (3, 5), (4, 4)]),
        );
        let score = square().accuracy(&other).unwrap();
        assert!(score > 0.0);
        assert_eq!(score, 1.0 / 7.0);
    }

    #[test]
    fn test_accuracy_empty_submission_is_zero() {
        let empty = Shape::empty(ShapeTitle::Square, Difficulty::Easy);
        assert_eq!(square().accuracy(&empty).unwrap(), 0.0);
    }

    #[test]
    fn test_accuracy_empty_reference_is_zero() {
        let reference = Shape::empty(ShapeTitle::Square, Difficulty::Easy);
        assert_eq!(reference.accuracy(&square()).unwrap(), 0.0);
    }

    #[test]
    fn test_accuracy_is_not_clamped_above_one() {
        // Submitting a reference pixel twice counts as two matches.
        let reference = Shape::new(ShapeTitle::Circle, Difficulty::Easy, px(&[(0, 0), (1, 1)]));
        let doubled = Shape::new(
            ShapeTitle::Circle,
            Difficulty::Easy,
            px(&[(0, 0), (0, 0), (1, 1), (1, 1)]),
        );
        assert_eq!(reference.accuracy(&doubled).unwrap(), 2.0);
    }
}
