//! Difficulty tiers: which figures can be dealt and how long a round lasts.

use serde::{Deserialize, Serialize};
use sketchduel_protocol::{Difficulty, ShapeTitle};

use crate::CatalogError;

// ---------------------------------------------------------------------------
// DifficultyTier
// ---------------------------------------------------------------------------

/// The settings behind one difficulty level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    /// Figures a reference shape is drawn from, uniformly at random.
    pub titles: Vec<ShapeTitle>,

    /// Seconds on the clock when a round at this tier is dealt.
    pub round_budget_secs: f64,
}

impl DifficultyTier {
    pub fn new(titles: impl Into<Vec<ShapeTitle>>, round_budget_secs: f64) -> Self {
        Self {
            titles: titles.into(),
            round_budget_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// DifficultyCatalog
// ---------------------------------------------------------------------------

/// Maps every [`Difficulty`] to its [`DifficultyTier`].
///
/// All three tiers are always present, every tier has at least one title
/// and a positive budget. Both [`new`](Self::new) and deserialization
/// enforce this, so a dealer never sees an empty tier.
///
/// Defaults:
///
/// | Tier   | Titles                          | Budget |
/// |--------|---------------------------------|--------|
/// | Easy   | Circle, Square, Star            | 10 s   |
/// | Medium | Umbrella, House, Christmas Tree | 15 s   |
/// | Hard   | Helicopter, Car, Husky          | 20 s   |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogTiers")]
pub struct DifficultyCatalog {
    easy: DifficultyTier,
    medium: DifficultyTier,
    hard: DifficultyTier,
}

impl DifficultyCatalog {
    /// Builds a catalog, rejecting tiers that could never deal a round.
    pub fn new(
        easy: DifficultyTier,
        medium: DifficultyTier,
        hard: DifficultyTier,
    ) -> Result<Self, CatalogError> {
        let catalog = Self { easy, medium, hard };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks every tier.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for difficulty in Difficulty::ALL {
            let tier = self.tier(difficulty);
            if tier.titles.is_empty() {
                return Err(CatalogError::EmptyTier(difficulty));
            }
            if !tier.round_budget_secs.is_finite() || tier.round_budget_secs <= 0.0 {
                return Err(CatalogError::InvalidBudget {
                    difficulty,
                    secs: tier.round_budget_secs,
                });
            }
        }
        Ok(())
    }

    pub fn tier(&self, difficulty: Difficulty) -> &DifficultyTier {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn titles(&self, difficulty: Difficulty) -> &[ShapeTitle] {
        &self.tier(difficulty).titles
    }

    pub fn round_budget_secs(&self, difficulty: Difficulty) -> f64 {
        self.tier(difficulty).round_budget_secs
    }

    /// Budget of the tier every new match starts at.
    pub fn default_budget_secs(&self) -> f64 {
        self.round_budget_secs(Difficulty::default())
    }
}

/// Unchecked wire form of [`DifficultyCatalog`].
#[derive(Deserialize)]
struct CatalogTiers {
    easy: DifficultyTier,
    medium: DifficultyTier,
    hard: DifficultyTier,
}

impl TryFrom<CatalogTiers> for DifficultyCatalog {
    type Error = CatalogError;

    fn try_from(tiers: CatalogTiers) -> Result<Self, Self::Error> {
        Self::new(tiers.easy, tiers.medium, tiers.hard)
    }
}

impl Default for DifficultyCatalog {
    fn default() -> Self {
        Self {
            easy: DifficultyTier::new(
                [ShapeTitle::Circle, ShapeTitle::Square, ShapeTitle::Star],
                10.0,
            ),
            medium: DifficultyTier::new(
                [ShapeTitle::Umbrella, ShapeTitle::House, ShapeTitle::ChristmasTree],
                15.0,
            ),
            hard: DifficultyTier::new(
                [ShapeTitle::Helicopter, ShapeTitle::Car, ShapeTitle::Husky],
                20.0,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        assert!(DifficultyCatalog::default().validate().is_ok());
    }

    #[test]
    fn test_default_catalog_budgets() {
        let catalog = DifficultyCatalog::default();
        assert_eq!(catalog.round_budget_secs(Difficulty::Easy), 10.0);
        assert_eq!(catalog.round_budget_secs(Difficulty::Medium), 15.0);
        assert_eq!(catalog.round_budget_secs(Difficulty::Hard), 20.0);
        assert_eq!(catalog.default_budget_secs(), 10.0);
    }

    #[test]
    fn test_default_catalog_titles_per_tier() {
        let catalog = DifficultyCatalog::default();
        assert_eq!(
            catalog.titles(Difficulty::Medium),
            &[ShapeTitle::Umbrella, ShapeTitle::House, ShapeTitle::ChristmasTree]
        );
        assert!(catalog.titles(Difficulty::Hard).contains(&ShapeTitle::Husky));
    }

    #[test]
    fn test_new_rejects_empty_tier() {
        let result = DifficultyCatalog::new(
            DifficultyTier::new([ShapeTitle::Circle], 10.0),
            DifficultyTier::new(Vec::new(), 15.0),
            DifficultyTier::new([ShapeTitle::Car], 20.0),
        );
        assert_eq!(result, Err(CatalogError::EmptyTier(Difficulty::Medium)));
    }

    #[test]
    fn test_new_rejects_non_positive_budget() {
        let result = DifficultyCatalog::new(
            DifficultyTier::new([ShapeTitle::Circle], 0.0),
            DifficultyTier::new([ShapeTitle::House], 15.0),
            DifficultyTier::new([ShapeTitle::Car], 20.0),
        );
        assert!(matches!(
            result,
            Err(CatalogError::InvalidBudget { difficulty: Difficulty::Easy, .. })
        ));
    }

    #[test]
    fn test_catalog_deserializes_from_json() {
        let json = r#"{
            "easy":   {"titles": ["Circle"], "round_budget_secs": 20.0},
            "medium": {"titles": ["Christmas Tree"], "round_budget_secs": 30.0},
            "hard":   {"titles": ["Husky", "Car"], "round_budget_secs": 45.0}
        }"#;
        let catalog: DifficultyCatalog = serde_json::from_str(json).unwrap();

        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.titles(Difficulty::Medium), &[ShapeTitle::ChristmasTree]);
        assert_eq!(catalog.default_budget_secs(), 20.0);
    }

    #[test]
    fn test_catalog_deserialize_empty_tier_rejected() {
        let json = r#"{
            "easy":   {"titles": [], "round_budget_secs": 10.0},
            "medium": {"titles": ["House"], "round_budget_secs": 15.0},
            "hard":   {"titles": ["Car"], "round_budget_secs": 20.0}
        }"#;

        let err = serde_json::from_str::<DifficultyCatalog>(json).unwrap_err();

        assert!(err.to_string().contains("Easy"), "{err}");
    }

    #[test]
    fn test_catalog_deserialize_non_positive_budget_rejected() {
        let json = r#"{
            "easy":   {"titles": ["Circle"], "round_budget_secs": 10.0},
            "medium": {"titles": ["House"], "round_budget_secs": 15.0},
            "hard":   {"titles": ["Car"], "round_budget_secs": -1.0}
        }"#;

        assert!(serde_json::from_str::<DifficultyCatalog>(json).is_err());
    }

    #[test]
    fn test_catalog_json_roundtrip_keeps_tiers() {
        let catalog = DifficultyCatalog::default();
        let json = serde_json::to_string(&catalog).unwrap();
        let back: DifficultyCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }
}
