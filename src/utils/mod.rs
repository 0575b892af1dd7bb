//! Utility modules for configuration, settings, and error handling.

pub mod config;
pub mod error;
pub mod settings;

// Re-export commonly used error types for convenience
pub use error::{ApiError, OutputError, SettingsError, SkipReason, SyncError};
pub use settings::{Settings, SyncTarget};
