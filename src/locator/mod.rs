//! Locating frame paths inside the local workspace.

pub mod locate;
pub mod search;

// Re-export main types
pub use locate::LocalFileLocator;
pub use search::{FsWorkspaceSearch, WorkspaceSearch};
