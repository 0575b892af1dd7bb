//! Application frame classification.
//!
//! A stack trace mixes runtime internals, third-party dependencies and user
//! code. Only user code can be mapped to a line worth annotating, so the
//! policy here is a deny-list of dependency markers followed by a
//! conservative allow-list of conventional source roots.

use super::normalizer::{to_forward_slashes, RUNTIME_PREFIX};
use crate::utils::config::{APPLICATION_ROOTS, DEPENDENCY_MARKERS, DEPENDENCY_SEGMENTS};

/// Decide whether a frame belongs to application code
///
/// **Public** - pure, no I/O
///
/// # Arguments
/// * `raw_filename` - filename exactly as reported, `None` if the frame had none
/// * `normalized_path` - output of `normalize_path` for the same filename
///
/// Rejects frames without a filename and frames whose raw filename carries a
/// runtime descriptor prefix (`activesupport (7.0.4) lib/...`), which SDKs use
/// for interpreter and gem frames.
pub fn is_application_frame(raw_filename: Option<&str>, normalized_path: &str) -> bool {
    let Some(raw) = raw_filename else {
        return false;
    };

    if raw.trim().is_empty() || RUNTIME_PREFIX.is_match(&to_forward_slashes(raw.trim())) {
        return false;
    }

    is_application_path(normalized_path)
}

/// Apply the dependency deny-list and source-root allow-list to a normalized path
///
/// **Public** - usable on its own for paths that never had a prefix
pub fn is_application_path(normalized_path: &str) -> bool {
    if normalized_path.is_empty() || is_dependency_path(normalized_path) {
        return false;
    }

    APPLICATION_ROOTS
        .iter()
        .any(|root| has_segment(normalized_path, root))
}

/// True for paths inside gem, npm, pip or vendor directories
///
/// **Private** - internal helper
fn is_dependency_path(path: &str) -> bool {
    DEPENDENCY_MARKERS.iter().any(|marker| path.contains(marker))
        || DEPENDENCY_SEGMENTS.iter().any(|segment| has_segment(path, segment))
}

/// `segment/` at the start of the path or right after a `/`
fn has_segment(path: &str, segment: &str) -> bool {
    let leading = format!("{}/", segment);
    let inner = format!("/{}/", segment);
    path.starts_with(&leading) || path.contains(&inner)
}
