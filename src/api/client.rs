//! HTTP client for the GlitchTip REST API.
//!
//! Only two read-only endpoints are used: the project's unresolved issue list
//! and each issue's latest event.

use super::IssueSource;
use crate::parser::schema::Issue;
use crate::utils::config::{DEFAULT_HTTP_TIMEOUT, ERROR_BODY_PREVIEW};
use crate::utils::error::ApiError;
use crate::utils::settings::SyncTarget;
use log::{debug, warn};
use reqwest::blocking::Client;
use std::time::Duration;

/// Client bound to one GlitchTip organization and project
pub struct GlitchTipClient {
    client: Client,
    target: SyncTarget,
}

impl GlitchTipClient {
    /// Create a new client with the default timeout
    pub fn new(target: SyncTarget) -> Result<Self, ApiError> {
        Self::with_timeout(target, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(target: SyncTarget, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::RequestFailed)?;

        Ok(Self { client, target })
    }

    pub fn target(&self) -> &SyncTarget {
        &self.target
    }

    /// GET a URL and parse the body as JSON
    ///
    /// **Private** - shared by both endpoints
    ///
    /// # Errors
    /// * `ApiError::RequestFailed` - connection or timeout error
    /// * `ApiError::Status` - non-success HTTP status
    /// * `ApiError::InvalidResponse` - body is not JSON
    fn get_json(&self, url: &str) -> Result<serde_json::Value, ApiError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.target.auth_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(ApiError::RequestFailed)?;

        let status = response.status();
        let body = response.text().map_err(ApiError::RequestFailed)?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("{} (body starts: {:?})", e, preview(&body)))
        })
    }
}

impl IssueSource for GlitchTipClient {
    fn unresolved_issues(&self, limit: usize) -> Result<Vec<Issue>, ApiError> {
        let value = self.get_json(&issues_url(&self.target, limit))?;
        decode_issue_list(value)
    }

    fn latest_event(&self, issue_id: &str) -> Result<serde_json::Value, ApiError> {
        self.get_json(&latest_event_url(&self.target.base_url, issue_id))
    }
}

/// URL of the project's unresolved issue list
pub fn issues_url(target: &SyncTarget, limit: usize) -> String {
    format!(
        "{}/api/0/projects/{}/{}/issues/?query=is:unresolved&limit={}",
        target.base_url, target.organization_slug, target.project_slug, limit
    )
}

/// URL of an issue's latest event
pub fn latest_event_url(base_url: &str, issue_id: &str) -> String {
    format!("{}/api/0/issues/{}/events/latest/", base_url, issue_id)
}

/// Decode the issue list body
///
/// **Public** - the body must be an array; elements that are not issues
/// (e.g. no `id`) are dropped with a warning rather than failing the list
///
/// # Errors
/// * `ApiError::InvalidResponse` - body is not a JSON array
pub fn decode_issue_list(value: serde_json::Value) -> Result<Vec<Issue>, ApiError> {
    let serde_json::Value::Array(items) = value else {
        return Err(ApiError::InvalidResponse(
            "issue list must be a JSON array".to_string(),
        ));
    };

    let issues = items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match serde_json::from_value::<Issue>(item) {
            Ok(issue) => Some(issue),
            Err(e) => {
                warn!("Ignoring malformed issue at position {}: {}", position, e);
                None
            }
        })
        .collect();

    Ok(issues)
}

/// First characters of a response body, for error messages
fn preview(body: &str) -> String {
    body.chars().take(ERROR_BODY_PREVIEW).collect()
}
