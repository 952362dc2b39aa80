//! Error types for overlay operations that touch the outside world.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while exporting graphs or loading configuration.
///
/// Nothing inside the per-frame path returns these; they only come out of
/// file-based operations so the host can decide what to do.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (export file, config file).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// `HOME` is not set, so the default config location cannot be resolved.
    #[error("HOME env var not set")]
    HomeNotSet,
}
