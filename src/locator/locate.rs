//! Mapping normalized frame paths onto workspace files.

use super::search::WorkspaceSearch;
use crate::utils::config::{LOCATE_EXCLUDE_PATTERN, LOCATE_MAX_RESULTS};
use glob::Pattern;
use log::debug;
use std::path::PathBuf;

/// Finds the local file a normalized frame path refers to
///
/// **Public** - the first match wins. Several files can share the same
/// suffix (e.g. two services each with `app/models/user.rb`); no attempt is
/// made to tell them apart.
pub struct LocalFileLocator<W> {
    search: W,
}

impl<W: WorkspaceSearch> LocalFileLocator<W> {
    pub fn new(search: W) -> Self {
        Self { search }
    }

    /// Locate a file whose path ends with `normalized_path`
    ///
    /// # Returns
    /// Absolute path of the first match, `None` if nothing matches
    pub fn locate(&self, normalized_path: &str) -> Option<PathBuf> {
        let pattern = search_pattern(normalized_path)?;

        let found = self
            .search
            .search(&pattern, LOCATE_EXCLUDE_PATTERN, LOCATE_MAX_RESULTS);

        debug!(
            "Searching for {}, found: {}",
            normalized_path,
            found
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        found.into_iter().next()
    }
}

/// Build the `**/<path>` glob for a normalized path
///
/// **Private** - glob metacharacters in file names (`[id].tsx`) are escaped
fn search_pattern(normalized_path: &str) -> Option<String> {
    let relative = normalized_path
        .trim_start_matches("./")
        .trim_start_matches('/');

    if relative.is_empty() {
        return None;
    }

    Some(format!("**/{}", Pattern::escape(relative)))
}
