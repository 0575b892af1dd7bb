//! Output writers for the issue index.
//!
//! This module handles:
//! - Hover markdown for a single location
//! - JSON export of a whole index

pub mod hover;
pub mod json;

// Re-export main functions
pub use hover::render_hover;
pub use json::{read_index, to_export, write_index, IndexExport};
