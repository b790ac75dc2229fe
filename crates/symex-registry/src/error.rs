//! Error types for the substitution registry

use symex_core::{TypeName, TypeNameError};

/// Errors from registering or resolving substitutions
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Target already has a model
    #[error("duplicate substitution target: {0}")]
    DuplicateTarget(TypeName),

    /// Model already replaces another target
    #[error("model {model} already substitutes {existing}")]
    DuplicateModel {
        /// Model being registered twice
        model: TypeName,
        /// Target it already replaces
        existing: TypeName,
    },

    /// No model registered for target
    #[error("type is not substituted: {0}")]
    NotSubstituted(TypeName),

    /// Analyzed program reached an internal-only model
    #[error("model {model} for {target} is internal to the engine")]
    InternalUsage {
        /// Requested standard type
        target: TypeName,
        /// Internal model behind it
        model: TypeName,
    },

    /// Malformed type name in configuration
    #[error("invalid type name: {0}")]
    InvalidTypeName(#[from] TypeNameError),
}
