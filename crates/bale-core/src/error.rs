//! Specification error types.

use std::path::PathBuf;

/// Errors that can occur while loading or validating a specification document.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// The document (or a subspec) has no usable name.
    #[error("specification has no name")]
    MissingName,

    /// A platform identifier that the toolchain does not know.
    #[error("unknown platform: {name}")]
    UnknownPlatform { name: String },

    /// An attribute whose raw value does not have the shape its schema requires.
    #[error("attribute `{attribute}` of `{spec}` has an invalid shape: {detail}")]
    InvalidShape {
        spec: String,
        attribute: String,
        detail: String,
    },

    /// The document root is malformed (not an object, subspecs not a list, ...).
    #[error("invalid specification: {detail}")]
    InvalidDocument { detail: String },

    /// Manifest file extension not recognized.
    #[error("unsupported manifest format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Semver parse error for the `version` attribute.
    #[error("invalid version: {0}")]
    Version(#[from] semver::Error),

    /// JSON parse error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for specification operations.
pub type Result<T> = std::result::Result<T, SpecError>;
