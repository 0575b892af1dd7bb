//! Connectivity check against the configured GlitchTip project.

use crate::api::client::issues_url;
use crate::api::{GlitchTipClient, IssueSource};
use crate::utils::error::ApiError;
use crate::utils::settings::Settings;
use anyhow::{Context, Result};

/// Fetch a single unresolved issue and report what happened
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// `Ok(true)` when the API answered with an issue list, `Ok(false)` on an
/// HTTP or network failure (already printed)
///
/// # Errors
/// * Settings are incomplete
pub fn execute_check(settings: &Settings) -> Result<bool> {
    let target = settings.target().context("Cannot test connection")?;

    println!("\nTesting Connection to: {}", issues_url(&target, 1));

    let client = GlitchTipClient::new(target).context("Failed to create GlitchTip client")?;

    match client.unresolved_issues(1) {
        Ok(issues) => {
            println!("✅ Success! Found {} issues.", issues.len());
            if let Some(issue) = issues.first() {
                println!("   Sample Issue: [{}] {}", issue.short_id, issue.title);
            }
            Ok(true)
        }
        Err(ApiError::Status { status, body }) => {
            eprintln!("❌ API Error: {} {}", status, body);
            Ok(false)
        }
        Err(e) => {
            eprintln!("❌ Network Error: {}", e);
            Ok(false)
        }
    }
}
