//! Glitch Hover
//!
//! Maps unresolved GlitchTip issues onto the local source lines they were
//! raised from.
//!
//! A sync cycle fetches the project's unresolved issues, resolves each
//! issue's latest event to its innermost application frame, finds that
//! frame's file in the local workspace and publishes a fresh
//! (file, line) -> issues index that editors can query for hovers.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install glitch-hover
//! glitch-hover --help
//! ```

pub mod api;
pub mod commands;
pub mod index;
pub mod locator;
pub mod output;
pub mod parser;
pub mod sync;
pub mod utils;
