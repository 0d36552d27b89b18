//! Error types for version resolution.
//!
//! This module defines [`VersionError`] and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! Almost nothing in this crate fails: missing tools, unreachable networks
//! and disconnected databases all resolve to empty or sentinel values. The
//! variants here cover the few cases that must reach the caller:
//!
//! - configuration that cannot be read or parsed
//! - a remote API that answered with a body that is not a JSON object
//! - an HTTP client that cannot be built (e.g. a malformed proxy URL)

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for version resolution.
#[derive(Debug, Error)]
pub enum VersionError {
    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// External command could not be spawned or exited abnormally.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Remote API responded, but the body was not a JSON object.
    #[error("Failed to decode response from {url}: {source}")]
    RemoteDecode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for version resolution.
pub type Result<T> = std::result::Result<T, VersionError>;
