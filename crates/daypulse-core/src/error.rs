//! Core error types for daypulse-core.
//!
//! This module defines the error hierarchy using thiserror. Snapshot
//! loading is the only path that can fail a score computation; goal and
//! link loading degrade instead of erroring (see [`crate::snapshot`]),
//! and the score summarizer always resolves to a local fallback.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for daypulse-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Snapshot-related errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Snapshot loading errors.
///
/// A failure loading tasks or notes is fatal to the scoring call; a
/// failure loading goals or links is converted into a degraded snapshot
/// by [`crate::snapshot::Snapshot::load`].
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Failed to read the backing store
    #[error("Failed to read snapshot store at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the backing store
    #[error("Failed to parse snapshot store at {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A data source did not respond or returned an error
    #[error("{collection} data source unavailable: {reason}")]
    Unavailable {
        collection: &'static str,
        reason: String,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors raised while talking to the external summary model.
///
/// These never escape [`crate::summary::Summarizer::summarize`]; they
/// only classify which disclosure line is appended to the local
/// fallback report.
#[derive(Error, Debug)]
pub enum SummaryError {
    /// No API key in configuration or environment
    #[error("no API key configured")]
    MissingKey,

    /// The model did not answer within the configured deadline
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Transport-level failure (DNS, TLS, connection reset)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status from the service
    #[error("service returned HTTP {status}")]
    Status { status: u16 },

    /// The service answered but the body held no usable text
    #[error("service returned an empty or malformed response")]
    EmptyResponse,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
