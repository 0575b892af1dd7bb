use crate::utils::config::DEFAULT_SYNC_INTERVAL;
use crate::utils::settings::Settings;
use std::path::PathBuf;
use std::time::Duration;

/// Arguments shared by every command that runs a sync
#[derive(Debug, Clone)]
pub struct WorkspaceArgs {
    /// Connection settings (possibly incomplete)
    pub settings: Settings,

    /// Root of the local source tree
    pub workspace: PathBuf,
}

/// Arguments for the sync command
#[derive(Debug, Clone)]
pub struct SyncArgs {
    pub common: WorkspaceArgs,

    /// Write the index as JSON here
    pub output: Option<PathBuf>,

    /// Print a per-file summary to stdout
    pub print_summary: bool,
}

/// Arguments for the lookup command
#[derive(Debug, Clone)]
pub struct LookupArgs {
    pub common: WorkspaceArgs,

    /// File to query, absolute or relative to the current directory
    pub file: PathBuf,

    /// 1-based line to query
    pub line: u32,
}

/// Arguments for the watch command
#[derive(Debug, Clone)]
pub struct WatchArgs {
    pub common: WorkspaceArgs,

    /// Time between scheduled cycles
    pub interval: Duration,
}

impl Default for WorkspaceArgs {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            workspace: PathBuf::from("."),
        }
    }
}

impl Default for WatchArgs {
    fn default() -> Self {
        Self {
            common: WorkspaceArgs::default(),
            interval: DEFAULT_SYNC_INTERVAL,
        }
    }
}
