//! Sync cycles: building, publishing and scheduling the issue index.

pub mod builder;
pub mod cycle;
pub mod scheduler;

// Re-export main types and functions
pub use builder::{build_index, CycleReport};
pub use cycle::{SyncOutcome, SyncService};
pub use scheduler::Scheduler;
