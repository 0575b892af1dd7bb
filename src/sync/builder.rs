//! One fetch-resolve-index pass over the unresolved issues.
//!
//! The cycle:
//! 1. Fetches the unresolved issue list (failure aborts the cycle)
//! 2. Fetches each issue's latest event
//! 3. Resolves the innermost application frame
//! 4. Locates that frame's file in the workspace
//! 5. Records the issue under (file, line)
//!
//! Steps 2-4 can only skip the issue at hand; they never abort the cycle.

use crate::api::IssueSource;
use crate::index::IssueIndex;
use crate::locator::{LocalFileLocator, WorkspaceSearch};
use crate::parser::schema::Issue;
use crate::parser::stack_trace::resolve_event;
use crate::utils::error::{SkipReason, SyncError};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Counters for one completed cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Issues returned by the issue list
    pub fetched: usize,

    /// Issues recorded in the index
    pub attributed: usize,

    /// Issues left out, for any `SkipReason`
    pub skipped: usize,

    /// Issues whose id was already recorded at the same location
    pub duplicates: usize,

    pub elapsed: Duration,
}

/// Build a fresh index from the current unresolved issues
///
/// **Public** - main entry point of a sync cycle
///
/// # Arguments
/// * `source` - issue list and event provider
/// * `locator` - maps normalized frame paths to workspace files
/// * `limit` - page size of the issue list
///
/// # Returns
/// The new index (not yet published) and the cycle's counters
///
/// # Errors
/// * `SyncError::IssueList` - the issue list could not be fetched or decoded
pub fn build_index<S, W>(
    source: &S,
    locator: &LocalFileLocator<W>,
    limit: usize,
) -> Result<(IssueIndex, CycleReport), SyncError>
where
    S: IssueSource + ?Sized,
    W: WorkspaceSearch,
{
    let start_time = Instant::now();

    let issues = source
        .unresolved_issues(limit)
        .map_err(SyncError::IssueList)?;

    info!("Fetched {} unresolved issues", issues.len());

    let mut index = IssueIndex::new();
    let mut report = CycleReport {
        fetched: issues.len(),
        ..Default::default()
    };

    // Several issues often share a frame; search each path once per cycle
    let mut located: HashMap<String, Option<PathBuf>> = HashMap::new();

    for issue in issues {
        match attribute(&issue, source, locator, &mut located) {
            Ok((path, line)) => {
                debug!("Mapping issue {} to {}:{}", issue.short_id, path.display(), line);
                if index.insert(path, line, issue) {
                    report.attributed += 1;
                } else {
                    report.duplicates += 1;
                }
            }
            Err(reason @ SkipReason::EventUnavailable(_)) => {
                warn!("Skipping issue {}: {}", issue.short_id, reason);
                report.skipped += 1;
            }
            Err(reason) => {
                debug!("Skipping issue {}: {}", issue.short_id, reason);
                report.skipped += 1;
            }
        }
    }

    report.elapsed = start_time.elapsed();

    Ok((index, report))
}

/// Resolve one issue to a local (file, line)
///
/// **Private** - every failure is a `SkipReason` for this issue only
fn attribute<S, W>(
    issue: &Issue,
    source: &S,
    locator: &LocalFileLocator<W>,
    located: &mut HashMap<String, Option<PathBuf>>,
) -> Result<(PathBuf, u32), SkipReason>
where
    S: IssueSource + ?Sized,
    W: WorkspaceSearch,
{
    let event = source
        .latest_event(&issue.id)
        .map_err(SkipReason::EventUnavailable)?;

    let frame = resolve_event(&event)?;

    let local = located
        .entry(frame.normalized_path.clone())
        .or_insert_with(|| locator.locate(&frame.normalized_path))
        .clone()
        .ok_or_else(|| SkipReason::NoLocalFile(frame.normalized_path.clone()))?;

    Ok((local, frame.line_number))
}
