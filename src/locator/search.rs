//! Workspace file search backed by the local filesystem.
//!
//! Mirrors an editor's "find files" service: a glob include pattern, a glob
//! exclude pattern and a result cap. Matching is done on paths relative to
//! the workspace root with `/` separators.

use glob::{MatchOptions, Pattern};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into
const SKIPPED_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// Glob file search over a workspace
///
/// **Public** - the seam `LocalFileLocator` searches through
pub trait WorkspaceSearch {
    /// Absolute paths of files matching `pattern` and not `exclude`, at most `max_results`
    fn search(&self, pattern: &str, exclude: &str, max_results: usize) -> Vec<PathBuf>;
}

/// Searches a directory tree on disk
#[derive(Debug, Clone)]
pub struct FsWorkspaceSearch {
    root: PathBuf,
}

impl FsWorkspaceSearch {
    /// Create a search rooted at `root`
    ///
    /// # Errors
    /// * `std::io::Error` - root does not exist or cannot be resolved
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = std::fs::canonicalize(root.as_ref())?;
        debug!("Workspace root: {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Workspace-relative path with forward slashes
    fn relative(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let rel = rel.to_str()?;
        Some(rel.replace('\\', "/"))
    }

    /// Whether the walk should enter this entry
    fn should_enter(&self, entry: &DirEntry, exclude: Option<&Pattern>) -> bool {
        if !entry.file_type().is_dir() || entry.depth() == 0 {
            return true;
        }

        let name = entry.file_name().to_string_lossy();
        if SKIPPED_DIRS.iter().any(|dir| name == *dir) {
            return false;
        }

        // A directory is pruned when a child of it would be excluded
        match (exclude, self.relative(entry.path())) {
            (Some(exclude), Some(rel)) => !exclude.matches_with(&format!("{}/_", rel), match_options()),
            _ => true,
        }
    }
}

impl WorkspaceSearch for FsWorkspaceSearch {
    fn search(&self, pattern: &str, exclude: &str, max_results: usize) -> Vec<PathBuf> {
        if max_results == 0 {
            return Vec::new();
        }

        let include = match Pattern::new(pattern) {
            Ok(p) => p,
            Err(e) => {
                warn!("Invalid search pattern {:?}: {}", pattern, e);
                return Vec::new();
            }
        };

        let exclude = if exclude.is_empty() {
            None
        } else {
            match Pattern::new(exclude) {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!("Invalid exclude pattern {:?}: {}", exclude, e);
                    None
                }
            }
        };

        let mut found = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.should_enter(entry, exclude.as_ref()));

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(rel) = self.relative(entry.path()) else {
                continue;
            };

            if !include.matches_with(&rel, match_options()) {
                continue;
            }

            if exclude
                .as_ref()
                .is_some_and(|ex| ex.matches_with(&rel, match_options()))
            {
                continue;
            }

            found.push(entry.into_path());
            if found.len() >= max_results {
                break;
            }
        }

        debug!("Search {:?} found {} file(s)", pattern, found.len());
        found
    }
}

/// `*` never crosses a `/`; only `**` does
fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn workspace(files: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "").unwrap();
        }
        dir
    }

    #[test]
    fn test_suffix_search() {
        let dir = workspace(&["api/app/models/user.rb", "web/src/index.ts"]);
        let search = FsWorkspaceSearch::new(dir.path()).unwrap();

        let found = search.search("**/app/models/user.rb", "", 10);
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("api/app/models/user.rb"));
        assert!(found[0].is_absolute());
    }

    #[test]
    fn test_pattern_matches_at_root() {
        let dir = workspace(&["src/index.ts"]);
        let search = FsWorkspaceSearch::new(dir.path()).unwrap();

        assert_eq!(search.search("**/src/index.ts", "", 10).len(), 1);
    }

    #[test]
    fn test_exclude_pattern() {
        let dir = workspace(&["node_modules/pkg/src/index.ts", "a/node_modules/src/index.ts", "b/src/index.ts"]);
        let search = FsWorkspaceSearch::new(dir.path()).unwrap();

        let found = search.search("**/src/index.ts", "**/node_modules/**", 10);
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("b/src/index.ts"));
    }

    #[test]
    fn test_max_results_and_order() {
        let dir = workspace(&["z/lib/a.py", "a/lib/a.py", "m/lib/a.py"]);
        let search = FsWorkspaceSearch::new(dir.path()).unwrap();

        let found = search.search("**/lib/a.py", "", 2);
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("a/lib/a.py"));
        assert!(found[1].ends_with("m/lib/a.py"));
    }

    #[test]
    fn test_skips_vcs_directories() {
        let dir = workspace(&[".git/src/x.rs"]);
        let search = FsWorkspaceSearch::new(dir.path()).unwrap();

        assert!(search.search("**/src/x.rs", "", 10).is_empty());
    }

    #[test]
    fn test_missing_root() {
        assert!(FsWorkspaceSearch::new("/definitely/not/a/workspace").is_err());
    }
}
