//! Unified error type for the compose-gen workspace.
//!
//! Every failure is a validation failure raised while a value is being
//! constructed, plus the I/O and encoding errors of the rendering edge.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ComposeGenError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A single field violates its constraint.
    #[error("invalid value for `{field}`: {message}")]
    Validation {
        /// Dotted path of the offending field.
        field: String,
        /// Violated constraint.
        message: String,
    },

    /// Two or more options cannot be combined.
    #[error("conflicting options: {message}")]
    Conflict {
        /// Description of the inconsistency.
        message: String,
    },

    /// A service depends on a service that is not part of the document.
    #[error("service \"{service}\" depends on undefined service \"{dependency}\"")]
    DanglingDependency {
        /// Depending service.
        service: String,
        /// Missing dependency target.
        dependency: String,
    },

    /// A service mounts a named volume that is not declared.
    #[error("service \"{service}\" mounts undeclared volume \"{volume}\"")]
    UndeclaredVolume {
        /// Service with the mount.
        service: String,
        /// Missing volume name.
        volume: String,
    },

    /// The dependency edges between services form a cycle.
    #[error("cyclic dependency detected between services: {}", services.join(", "))]
    CyclicDependency {
        /// Services taking part in the cycle.
        services: Vec<String>,
    },

    /// External YAML did not match the closed schema.
    #[error("schema error: {source}")]
    Schema {
        /// Underlying decoding error (unknown field, bad literal, missing key).
        #[from]
        source: serde_yaml::Error,
    },

    /// JSON serialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl ComposeGenError {
    /// Shorthand for a [`ComposeGenError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`ComposeGenError::Conflict`] error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ComposeGenError>;
