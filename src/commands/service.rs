//! Wiring of the real API client and filesystem search into a `SyncService`.

use super::models::WorkspaceArgs;
use crate::api::GlitchTipClient;
use crate::index::IndexHandle;
use crate::locator::{FsWorkspaceSearch, LocalFileLocator};
use crate::sync::SyncService;
use crate::utils::error::SettingsError;
use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

/// Service type used by the CLI
pub type CliSyncService = SyncService<GlitchTipClient, FsWorkspaceSearch>;

/// Build a sync service for a workspace
///
/// **Public** - incomplete settings give a service whose cycles are no-ops
///
/// # Errors
/// * Workspace root does not exist
/// * HTTP client cannot be created
pub fn build_service(args: &WorkspaceArgs) -> Result<CliSyncService> {
    let search = FsWorkspaceSearch::new(&args.workspace).with_context(|| {
        format!("Workspace is not readable: {}", args.workspace.display())
    })?;

    let source = match args.settings.target() {
        Ok(target) => {
            info!(
                "GlitchTip project: {}/{} at {}",
                target.organization_slug, target.project_slug, target.base_url
            );
            Some(GlitchTipClient::new(target).context("Failed to create GlitchTip client")?)
        }
        Err(SettingsError::Incomplete { missing }) => {
            info!("GlitchTip config incomplete (missing {})", missing.join(", "));
            None
        }
        Err(e) => return Err(e.into()),
    };

    Ok(SyncService::new(
        source,
        LocalFileLocator::new(search),
        Arc::new(IndexHandle::new()),
    ))
}
