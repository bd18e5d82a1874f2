use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::piece::Side;

/// Rules and scoring values fixed for the lifetime of a match.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Awarded to the capturing side for every piece it removes.
    pub piece_value: u32,
    /// Awarded to a side each time one of its pieces is crowned.
    pub king_bonus: u32,
    /// Awarded once to the winner.
    pub win_bonus: u32,
    pub first_turn: Side,
    /// Force a capture on the first jump of a turn whenever one is available.
    /// Off by default: only continuing a chain is compulsory.
    pub mandatory_capture: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            piece_value: 10,
            king_bonus: 5,
            win_bonus: 100,
            first_turn: Side::Red,
            mandatory_capture: false,
        }
    }
}

impl RulesConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_bonus < self.piece_value {
            return Err(ConfigError::Invalid(format!(
                "win_bonus ({}) must be at least piece_value ({})",
                self.win_bonus, self.piece_value
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = RulesConfig::from_json("{}").expect("defaults parse");
        assert_eq!(config, RulesConfig::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let json = r#"{"king_bonus": 7, "first_turn": "White", "mandatory_capture": true}"#;
        let config = RulesConfig::from_json(json).expect("valid config");
        assert_eq!(config.king_bonus, 7);
        assert_eq!(config.first_turn, Side::White);
        assert!(config.mandatory_capture);
        assert_eq!(config.piece_value, 10);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = RulesConfig::from_json(r#"{"board_size": 10}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn win_bonus_below_piece_value_is_invalid() {
        let err = RulesConfig::from_json(r#"{"piece_value": 50, "win_bonus": 20}"#)
            .expect_err("win bonus below piece value");
        assert!(err.to_string().contains("win_bonus"));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = RulesConfig::load("/nonexistent/checkers-rules.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
