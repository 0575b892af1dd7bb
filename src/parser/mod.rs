//! Stack trace parsing and frame attribution.
//!
//! This module handles:
//! - Normalizing frame filenames from different runtimes
//! - Classifying frames as application or dependency code
//! - Selecting the frame an issue is attributed to

pub mod classifier;
pub mod normalizer;
pub mod schema;
pub mod stack_trace;

// Re-export main types
pub use classifier::{is_application_frame, is_application_path};
pub use normalizer::normalize_path;
pub use schema::{Issue, StackFrame};
pub use stack_trace::resolve_event;
