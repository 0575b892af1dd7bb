//! Issue index and its publication.

pub mod issue_index;
pub mod snapshot;

// Re-export main types
pub use issue_index::IssueIndex;
pub use snapshot::IndexHandle;
