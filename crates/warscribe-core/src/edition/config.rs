//! Tunable rule thresholds.

use serde::{Deserialize, Serialize};

use crate::error::EditionError;

/// Soft movement ceiling used when no config is supplied.
pub const DEFAULT_MAX_MOVE_INCHES: f64 = 24.0;

/// Thresholds an edition applies when judging actions.
///
/// Fields missing from a config document take their defaults.
///
/// # Example
///
/// ```
/// use warscribe_core::edition::RulesConfig;
///
/// let config = RulesConfig::from_json(r#"{"max_move_inches": 20.0}"#)?;
/// assert_eq!(config.max_move_inches, 20.0);
///
/// assert_eq!(RulesConfig::from_json("{}")?, RulesConfig::default());
/// # Ok::<(), warscribe_core::error::EditionError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Moves longer than this are flagged with a warning.
    pub max_move_inches: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_move_inches: DEFAULT_MAX_MOVE_INCHES,
        }
    }
}

impl RulesConfig {
    /// Reads a config from JSON and checks it.
    ///
    /// # Errors
    ///
    /// Returns [`EditionError::InvalidConfig`] if the document does not parse
    /// or holds out-of-range values.
    pub fn from_json(document: &str) -> Result<Self, EditionError> {
        let config: Self = serde_json::from_str(document)
            .map_err(|err| EditionError::InvalidConfig(err.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Checks that thresholds are usable.
    ///
    /// # Errors
    ///
    /// Returns [`EditionError::InvalidConfig`] for a negative or non-finite
    /// movement ceiling.
    pub fn check(&self) -> Result<(), EditionError> {
        if !self.max_move_inches.is_finite() || self.max_move_inches < 0.0 {
            return Err(EditionError::InvalidConfig(format!(
                "max_move_inches must be a non-negative number, got {}",
                self.max_move_inches
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ceiling_is_24() {
        assert_eq!(RulesConfig::default().max_move_inches, 24.0);
    }

    #[test]
    fn negative_ceiling_is_rejected() {
        let err = RulesConfig::from_json(r#"{"max_move_inches": -3}"#).unwrap_err();
        assert!(matches!(err, EditionError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(RulesConfig::from_json("{max_move_inches}").is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = RulesConfig::from_json(r#"{"flavour": "grimdark"}"#).unwrap();
        assert_eq!(config, RulesConfig::default());
    }
}
