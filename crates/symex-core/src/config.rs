//! Engine configuration
//!
//! Provides [`EngineConfig`], loadable from TOML:
//!
//! ```toml
//! max_paths = 1024
//! default_symbolic_length = 4
//! disabled_substitutions = ["java.util.HashSet"]
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration of the modeling layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum number of explored paths per terminal stream operation
    pub max_paths: usize,
    /// Length bound for synthesized fully symbolic collections
    pub default_symbolic_length: usize,
    /// Standard types removed from the default substitution table
    pub disabled_substitutions: Vec<String>,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With exploration bound
    #[inline]
    #[must_use]
    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = max_paths;
        self
    }

    /// With symbolic length bound
    #[inline]
    #[must_use]
    pub fn with_default_symbolic_length(mut self, len: usize) -> Self {
        self.default_symbolic_length = len;
        self
    }

    /// With an additional disabled substitution target
    #[inline]
    #[must_use]
    pub fn with_disabled_substitution(mut self, target: impl Into<String>) -> Self {
        self.disabled_substitutions.push(target.into());
        self
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    /// Returns error on malformed TOML or invalid values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is invalid
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for a zero path bound
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_paths == 0 {
            return Err(ConfigError::Invalid("max_paths must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_paths: 4096,
            default_symbolic_length: 3,
            disabled_substitutions: Vec::new(),
        }
    }
}
