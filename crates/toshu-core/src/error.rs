//! Error types for toshu-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during text analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input text is empty or whitespace-only.
    #[error("no scorable text in input")]
    EmptyInput,
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors raised by the state store and the report writer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing a backing file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// In-memory state could not be serialized.
    #[error("failed to serialize {what}: {source}")]
    Serialize {
        /// Which collection was being written.
        what: &'static str,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// A reference was added with blank text.
    #[error("reference text is empty")]
    EmptyReference,

    /// A custom theme color is not a `#RGB` / `#RRGGBB` hex string.
    #[error("invalid color for {field}: {value:?} (expected #RGB or #RRGGBB)")]
    InvalidColor {
        /// The theme field being updated.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Result type alias using [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;
