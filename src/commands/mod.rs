//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands wire the library components together for one user task.

pub mod check;
pub mod models;
pub mod service;
pub mod sync;
pub mod watch;

// Re-export main command functions
pub use check::execute_check;
pub use models::{LookupArgs, SyncArgs, WatchArgs, WorkspaceArgs};
pub use service::build_service;
pub use sync::{execute_lookup, execute_sync};
pub use watch::execute_watch;
