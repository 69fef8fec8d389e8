//! Trie configuration module.
//!
//! Settings applied to the trie engine built by the command-line driver.

use super::{ConfigResult, Validate};
use crate::data_structures::weighted_trie::{
    is_valid_weight, WeightedTrieConfig, DEFAULT_MAX_WORD_LENGTH, DEFAULT_WEIGHT,
};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Trie engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrieSettings {
    /// Weight written onto each edge when a word has no explicit weight
    pub default_weight: f64,

    /// Maximum number of characters accepted in a word
    pub max_word_length: usize,
}

impl Default for TrieSettings {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_WEIGHT,
            max_word_length: DEFAULT_MAX_WORD_LENGTH,
        }
    }
}

impl Validate for TrieSettings {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_word_length == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "trie.max_word_length".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if !is_valid_weight(self.default_weight, self.max_word_length) {
            return Err(ConfigError::ValueOutOfRange {
                key: "trie.default_weight".to_string(),
                message: format!(
                    "must be non-negative and finite when multiplied by max_word_length ({}), got {}",
                    self.max_word_length, self.default_weight
                ),
            });
        }

        Ok(())
    }
}

impl From<&TrieSettings> for WeightedTrieConfig {
    fn from(settings: &TrieSettings) -> Self {
        Self {
            default_weight: settings.default_weight,
            max_word_length: settings.max_word_length,
        }
    }
}
