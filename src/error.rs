//! Error types for container extraction

use thiserror::Error;

/// Errors that can occur while walking a mail container.
///
/// Only `UnsupportedContainer` ever escapes a top-level parse call; the
/// remaining variants describe contained conditions that degrade the output
/// (a dropped attachment, a truncated nesting branch) without aborting it.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Input bytes are not a recognizable mail container
    #[error("Unsupported container format: {0}")]
    UnsupportedContainer(String),

    /// A single attachment's payload could not be materialized
    #[error("Failed to extract attachment '{filename}': {details}")]
    Extraction { filename: String, details: String },

    /// The nested-container depth bound was reached
    #[error("Nested container depth {0} exceeds the configured bound")]
    DepthExceeded(usize),

    /// A metadata value was missing or of unexpected shape
    #[error("Malformed metadata field {field}: {details}")]
    Metadata { field: String, details: String },

    /// An analysis answer matched neither field-grammar layout
    #[error("Analysis answer matched no known field layout")]
    AnalysisLayout,
}

/// Result type for container extraction operations
pub type Result<T> = std::result::Result<T, ParseError>;
