//! Error types for Campaign Loader.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints (a failed platform load is recoverable; a
//!   malformed descriptor is not)
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! Errors can be formatted for human consumption with headline, reason, and fix:
//! ```text
//! ✗ Platform Load Failed
//!   Reason: platform 'daphne' load failed: DODS endpoint unreachable
//!   Fix: Check the remote THREDDS/DODS server and re-run; sibling platforms are unaffected.
//! ```
//!
//! # Machine-Facing Output
//!
//! Errors serialize to structured JSON:
//! ```json
//! {
//!   "code": 20,
//!   "category": "load",
//!   "message": "platform 'daphne' load failed: DODS endpoint unreachable",
//!   "recoverable": true,
//!   "context": { "platform": "daphne" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for Campaign Loader operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Campaign descriptor errors (ids, windows, scene URIs).
    Config,
    /// Per-platform load errors from the external loader.
    Load,
    /// Terrain/relief registration errors (post-load).
    Terrain,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Load => write!(f, "load"),
            ErrorCategory::Terrain => write!(f, "terrain"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for Campaign Loader.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19): fatal before any load is dispatched
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid platform '{platform}': {reason}")]
    InvalidPlatform { platform: String, reason: String },

    #[error("invalid terrain scene '{uri}': {reason}")]
    InvalidScene { uri: String, reason: String },

    // Load errors (20-29): recoverable, accumulated per platform
    #[error("platform '{platform}' load failed: {reason}")]
    PlatformLoad { platform: String, reason: String },

    // Terrain errors (30-39): fatal, but only after all loads were attempted
    #[error("terrain registration failed: {0}")]
    TerrainRegistration(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code for this error type.
    ///
    /// Error codes are grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Load errors
    /// - 30-39: Terrain errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidPlatform { .. } => 11,
            Error::InvalidScene { .. } => 12,
            Error::PlatformLoad { .. } => 20,
            Error::TerrainRegistration(_) => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidPlatform { .. } | Error::InvalidScene { .. } => {
                ErrorCategory::Config
            }
            Error::PlatformLoad { .. } => ErrorCategory::Load,
            Error::TerrainRegistration(_) => ErrorCategory::Terrain,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable.
    ///
    /// A platform load failure never aborts the run; the dispatcher records
    /// it and continues with sibling platforms. Descriptor errors are not
    /// recoverable at runtime since declarations are compiled in.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) => false,
            Error::InvalidPlatform { .. } => false,
            Error::InvalidScene { .. } => false,
            Error::PlatformLoad { .. } => true,
            Error::TerrainRegistration(_) => true, // Re-run registers idempotently
            Error::Io(_) => true,
            Error::Json(_) => true,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => {
                "Fix the campaign declaration (id, title, time windows) and rebuild."
            }
            Error::InvalidPlatform { .. } => {
                "Fix the platform declaration: the time window must satisfy start <= end."
            }
            Error::InvalidScene { .. } => {
                "Terrain scene URIs must be absolute http(s) URLs pointing at an .x3d scene."
            }
            Error::PlatformLoad { .. } => {
                "Check the remote THREDDS/DODS server and re-run; sibling platforms are unaffected."
            }
            Error::TerrainRegistration(_) => {
                "Re-run after the loads succeed; terrain registration is idempotent."
            }
            Error::Io(_) => {
                "Check disk space and permissions, then retry the operation."
            }
            Error::Json(_) => {
                "Report output could not be serialized. Re-run with '--format text'."
            }
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidPlatform { .. } => "Invalid Platform Declaration",
            Error::InvalidScene { .. } => "Invalid Terrain Scene",
            Error::PlatformLoad { .. } => "Platform Load Failed",
            Error::TerrainRegistration(_) => "Terrain Registration Failed",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Serialization Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g., platform id, scene URI).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::InvalidPlatform { platform, .. } | Error::PlatformLoad { platform, .. } => {
                context.insert("platform".to_string(), serde_json::json!(platform));
            }
            Error::InvalidScene { uri, .. } => {
                context.insert("uri".to_string(), serde_json::json!(uri));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
