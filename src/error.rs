//! Error types for marginalia

use thiserror::Error;

/// Main error type for annotation resolution
#[derive(Debug, Error)]
pub enum MarginaliaError {
    #[error("Ambiguous annotation name '{name}': matches {}", candidates.join(", "))]
    AmbiguousName {
        name: String,
        candidates: Vec<String>,
    },

    #[error("Field '{field}' of annotation '{annotation}' is assigned by the resolver and cannot be modified")]
    FieldAccess { annotation: String, field: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MarginaliaError {
    /// Candidate type names carried by an ambiguity error, if any
    pub fn candidates(&self) -> &[String] {
        match self {
            MarginaliaError::AmbiguousName { candidates, .. } => candidates,
            _ => &[],
        }
    }
}

/// Result type using MarginaliaError
pub type Result<T> = std::result::Result<T, MarginaliaError>;
