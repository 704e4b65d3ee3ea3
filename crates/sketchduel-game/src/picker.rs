//! Random choice of the reference figure.
//!
//! Dealing a round picks one title out of the tier's candidates. The
//! choice goes through [`ShapePicker`] so tests can pin it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sketchduel_protocol::ShapeTitle;

/// Chooses one title out of a non-empty candidate list.
///
/// Any `FnMut(&[ShapeTitle]) -> ShapeTitle` closure is a picker:
///
/// ```rust
/// use sketchduel_game::ShapePicker;
/// use sketchduel_protocol::ShapeTitle;
///
/// let mut always_first = |titles: &[ShapeTitle]| titles[0];
/// let picked = always_first.pick(&[ShapeTitle::Star, ShapeTitle::Car]);
/// assert_eq!(picked, ShapeTitle::Star);
/// ```
pub trait ShapePicker: Send {
    /// `candidates` always comes from a validated catalog tier, so it is
    /// never empty.
    fn pick(&mut self, candidates: &[ShapeTitle]) -> ShapeTitle;
}

impl<F> ShapePicker for F
where
    F: FnMut(&[ShapeTitle]) -> ShapeTitle + Send,
{
    fn pick(&mut self, candidates: &[ShapeTitle]) -> ShapeTitle {
        self(candidates)
    }
}

/// Uniform choice backed by `rand`.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Seeds from the thread-local generator.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible sequence of picks.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapePicker for RandomPicker {
    fn pick(&mut self, candidates: &[ShapeTitle]) -> ShapeTitle {
        let index = self.rng.random_range(0..candidates.len());
        candidates[index]
    }
}
