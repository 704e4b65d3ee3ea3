//! Per-area settings.

use serde::{Deserialize, Serialize};
use sketchduel_game::DifficultyCatalog;

use crate::ConfigError;

/// Settings shared by every area a manager spawns.
///
/// Missing fields fall back to [`AreaConfig::default`]:
///
/// ```rust
/// use sketchduel_area::AreaConfig;
///
/// let config = AreaConfig::from_json(r#"{ "channel_size": 8 }"#).unwrap();
/// assert_eq!(config.channel_size, 8);
/// assert_eq!(config.catalog.default_budget_secs(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    /// Candidate figures and base round budget per difficulty.
    pub catalog: DifficultyCatalog,

    /// Capacity of each area actor's command channel. Senders wait when it
    /// is full.
    pub channel_size: usize,
}

impl AreaConfig {
    /// Parses and validates a JSON config.
    ///
    /// # Errors
    /// [`ConfigError::Parse`] for malformed JSON or an unusable catalog,
    /// otherwise whatever [`validate`](Self::validate) reports.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalog.validate()?;
        if self.channel_size == 0 {
            return Err(ConfigError::ZeroChannelSize);
        }
        Ok(())
    }
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            catalog: DifficultyCatalog::default(),
            channel_size: 64,
        }
    }
}
