//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while decoding profile input
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Distinguished query failures.
///
/// "No frames matching" and empty input are not errors; they are
/// reported through the query result types instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("no line info for frames matching '{pattern}'")]
    NoLineInfo { pattern: String },

    #[error("ASSERT FAILED: {name} self={self_pct:.1}% >= threshold {threshold:.1}%")]
    AssertionFailed {
        name: String,
        self_pct: f64,
        threshold: f64,
    },
}

/// Errors that can occur during flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    #[error("Empty stack data")]
    EmptyStacks,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render flamegraph: {0}")]
    RenderFailed(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
