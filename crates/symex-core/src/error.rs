//! Error types for SYMEX Core

use std::path::PathBuf;

/// Errors related to type identities
#[derive(Debug, thiserror::Error)]
pub enum TypeNameError {
    /// Type name with no segments
    #[error("type name is empty")]
    Empty,

    /// Empty segment in dotted name
    #[error("type name contains empty segment: '{0}'")]
    EmptySegment(String),

    /// Invalid segment characters
    #[error("invalid segment: {0} (must be alphanumeric, '_' or '$')")]
    InvalidSegment(String),
}

/// Errors while loading engine configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantically invalid value
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_name_error_display() {
        let err = TypeNameError::InvalidSegment("a-b".to_string());
        assert_eq!(
            err.to_string(),
            "invalid segment: a-b (must be alphanumeric, '_' or '$')"
        );
    }

    #[test]
    fn config_io_error_display() {
        let err = ConfigError::io_error(
            "missing.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("missing.toml"));
    }
}
