//! GlitchTip API access.

pub mod client;

// Re-export main types
pub use client::GlitchTipClient;

use crate::parser::schema::Issue;
use crate::utils::error::ApiError;

/// Read-only source of issues and their latest events
///
/// **Public** - implemented by `GlitchTipClient`; tests substitute stubs
pub trait IssueSource {
    /// Up to `limit` unresolved issues, in the order the service returns them
    fn unresolved_issues(&self, limit: usize) -> Result<Vec<Issue>, ApiError>;

    /// Latest event payload of one issue
    fn latest_event(&self, issue_id: &str) -> Result<serde_json::Value, ApiError>;
}
