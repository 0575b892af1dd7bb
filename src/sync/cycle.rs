//! The sync service: runs cycles and publishes their results.

use super::builder::{build_index, CycleReport};
use crate::api::IssueSource;
use crate::index::IndexHandle;
use crate::locator::{LocalFileLocator, WorkspaceSearch};
use crate::utils::config::ISSUE_PAGE_LIMIT;
use crate::utils::error::SyncError;
use log::{error, info};
use std::sync::Arc;

/// Result of a cycle that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A new index was published
    Completed(CycleReport),

    /// Settings are incomplete; nothing was fetched or published
    NotConfigured,
}

/// Owns everything a cycle needs and the handle it publishes to
///
/// **Public** - `run_cycle` is the trigger invoked on demand and by the `Scheduler`
pub struct SyncService<S, W> {
    source: Option<S>,
    locator: LocalFileLocator<W>,
    index: Arc<IndexHandle>,
    limit: usize,
}

impl<S: IssueSource, W: WorkspaceSearch> SyncService<S, W> {
    /// Create a service
    ///
    /// # Arguments
    /// * `source` - `None` when settings are incomplete; cycles become no-ops
    /// * `locator` - workspace file locator
    /// * `index` - handle readers query
    pub fn new(source: Option<S>, locator: LocalFileLocator<W>, index: Arc<IndexHandle>) -> Self {
        Self {
            source,
            locator,
            index,
            limit: ISSUE_PAGE_LIMIT,
        }
    }

    /// Override the issue list page size
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// The handle this service publishes to
    pub fn index(&self) -> &Arc<IndexHandle> {
        &self.index
    }

    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Run one cycle and publish its index
    ///
    /// **Public** - on error the previously published index stays current
    ///
    /// # Errors
    /// * `SyncError::IssueList` - issue list fetch or decode failed
    pub fn run_cycle(&self) -> Result<SyncOutcome, SyncError> {
        let Some(source) = &self.source else {
            info!("GlitchTip config incomplete, skipping sync");
            return Ok(SyncOutcome::NotConfigured);
        };

        info!("Starting GlitchTip sync...");

        match build_index(source, &self.locator, self.limit) {
            Ok((index, report)) => {
                self.index.publish(index);
                info!(
                    "GlitchTip: Synced {} issues ({} attributed, {} skipped) in {:.2}s",
                    report.fetched,
                    report.attributed,
                    report.skipped,
                    report.elapsed.as_secs_f64()
                );
                Ok(SyncOutcome::Completed(report))
            }
            Err(e) => {
                error!("GlitchTip sync failed: {}", e);
                Err(e)
            }
        }
    }
}
