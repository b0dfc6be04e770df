use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};

/// Symbols every engine needs to agree on.
///
/// Passed explicitly into each transformation so grammars with different
/// conventions can live side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The symbol standing for the empty string inside a grammar.
    pub epsilon: String,
    /// Token written in source files in place of `epsilon`.
    pub epsilon_sign: String,
    /// Marker appended to a symbol to derive a fresh non-terminal.
    pub prime: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon: "ε".to_string(),
            epsilon_sign: ":eps:".to_string(),
            prime: "'".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(source: &str) -> Result<Self> {
        let config = serde_json::from_str(source).map_err(FormatError::from)?;
        Ok(config)
    }

    pub fn is_epsilon_token(&self, token: &str) -> bool {
        token == self.epsilon || token == self.epsilon_sign
    }
}
