//! One-shot sync and lookup commands.
//!
//! Both run a single cycle against the workspace. `sync` reports on the
//! whole index; `lookup` prints the hover for one location.

use super::models::{LookupArgs, SyncArgs};
use super::service::build_service;
use crate::index::IssueIndex;
use crate::output::{render_hover, write_index};
use crate::sync::SyncOutcome;
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

/// Execute the sync command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Workspace or client setup failures
/// * Issue list fetch failures
/// * File write errors
pub fn execute_sync(args: SyncArgs) -> Result<()> {
    let service = build_service(&args.common)?;

    let outcome = service.run_cycle().context("GlitchTip sync failed")?;
    if outcome == SyncOutcome::NotConfigured {
        println!("GlitchTip config incomplete; nothing to sync.");
        return Ok(());
    }

    let index = service.index().snapshot();

    if let Some(path) = &args.output {
        write_index(&index, path).context("Failed to write index JSON")?;
        info!("✓ Index written to: {}", path.display());
    }

    if args.print_summary {
        println!("{}", summarize(&index, &args.common.workspace));
    }

    Ok(())
}

/// Execute the lookup command
///
/// **Public** - main entry point called from main.rs
pub fn execute_lookup(args: LookupArgs) -> Result<()> {
    let service = build_service(&args.common)?;

    if service.run_cycle().context("GlitchTip sync failed")? == SyncOutcome::NotConfigured {
        println!("GlitchTip config incomplete; nothing to look up.");
        return Ok(());
    }

    let file = absolute_file(&args.file);
    let issues = service.index().lookup(&file, args.line);

    if issues.is_empty() {
        println!("No issues at {}:{}", file.display(), args.line);
    } else {
        print!("{}", render_hover(&issues));
    }

    Ok(())
}

/// Resolve a user-supplied file the same way workspace search does
///
/// **Public** - missing files are returned unchanged
pub fn absolute_file(file: &Path) -> PathBuf {
    std::fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf())
}

/// Text summary of an index, paths shown relative to the workspace
///
/// **Public** - used by `sync --summary`
pub fn summarize(index: &IssueIndex, workspace: &Path) -> String {
    let root = absolute_file(workspace);
    let mut lines = Vec::new();

    lines.push("=".repeat(80));
    lines.push("GLITCHTIP INDEX".to_string());
    lines.push("=".repeat(80));
    lines.push(format!("Files:        {}", index.file_count()));
    lines.push(format!("Attributions: {}", index.attribution_count()));
    lines.push(String::new());

    for (path, line, issues) in index.entries() {
        let shown = path.strip_prefix(&root).unwrap_or(path);
        for issue in issues {
            lines.push(format!(
                "{}:{}  [{}] {} ({} events)",
                shown.display(),
                line,
                issue.short_id,
                issue.title,
                issue.event_count
            ));
        }
    }

    lines.push("=".repeat(80));
    lines.join("\n")
}
