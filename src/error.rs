//! Error types for image-search-dl
//!
//! This module provides error handling for the library:
//! - [`Error`] - the crate-wide error type returned by fallible operations
//! - [`SkipReason`] - classification of per-image failures that are logged and skipped
//!   instead of aborting a batch

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for image-search-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for image-search-dl
///
/// Each variant includes contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "api_key")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error (connection failure, timeout, body read failure)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// The requested URL
        url: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// Image decode or encode failure
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Image search API returned an unusable response
    #[error("search error: {0}")]
    Search(String),

    /// Visual search API returned an unusable response
    #[error("visual search error: {0}")]
    VisualSearch(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub(crate) fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    /// Classify this error as the reason an image was skipped
    pub fn skip_reason(&self) -> SkipReason {
        match self {
            Error::Network(e) if e.is_timeout() => SkipReason::Timeout,
            Error::Network(_) => SkipReason::Transport,
            Error::HttpStatus { status, .. } => SkipReason::Status(*status),
            Error::Image(_) => SkipReason::Decode,
            Error::Io(_) => SkipReason::Io,
            _ => SkipReason::Other,
        }
    }
}

/// Why a single image was skipped
///
/// Per-image failures never abort a batch; they are reported with one of these reasons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "status", rename_all = "snake_case")]
pub enum SkipReason {
    /// Download exceeded the configured timeout
    Timeout,
    /// Connection or transport failure
    Transport,
    /// Server answered with a non-success status
    Status(u16),
    /// Bytes could not be decoded or re-encoded as an image
    Decode,
    /// Writing the file failed
    Io,
    /// Anything else
    Other,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Timeout => write!(f, "timeout"),
            SkipReason::Transport => write!(f, "transport error"),
            SkipReason::Status(code) => write!(f, "HTTP {code}"),
            SkipReason::Decode => write!(f, "decode/encode error"),
            SkipReason::Io => write!(f, "I/O error"),
            SkipReason::Other => write!(f, "other error"),
        }
    }
}

/// Error raised when a destination path cannot be used
pub(crate) fn destination_error(path: &std::path::Path, e: std::io::Error) -> Error {
    Error::Io(std::io::Error::new(
        e.kind(),
        format!(
            "Failed to create destination directory '{}': {}",
            path.display(),
            e
        ),
    ))
}

/// Error raised when a query or reference file cannot be read
pub(crate) fn input_file_error(path: &PathBuf, e: std::io::Error) -> Error {
    Error::Io(std::io::Error::new(
        e.kind(),
        format!("Failed to read input file '{}': {}", path.display(), e),
    ))
}
