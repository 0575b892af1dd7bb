//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while talking to the GlitchTip API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Errors that abort a whole sync cycle
///
/// The previously published index stays in place when one of these occurs.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to fetch unresolved issues: {0}")]
    IssueList(#[source] ApiError),
}

/// Errors that can occur while loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("GlitchTip config incomplete, missing: {}", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },

    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single issue was left out of the index
///
/// None of these abort the cycle; they are logged and counted.
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("latest event unavailable: {0}")]
    EventUnavailable(#[source] ApiError),

    #[error("event has no exception entry")]
    NoExceptionEntry,

    #[error("exception has no stacktrace frames")]
    NoStacktrace,

    #[error("no application frame in stacktrace")]
    NoApplicationFrame,

    #[error("application frame has no line number")]
    MissingLineNumber,

    #[error("no local file matches {0}")]
    NoLocalFile(String),
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
