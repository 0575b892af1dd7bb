//! The (file, line) -> issues lookup table built by one sync cycle.

use crate::parser::schema::Issue;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Issues keyed by absolute local file path, then by 1-based line
///
/// **Public** - filled while owned by the sync cycle, then published and
/// only ever read. A published index is never edited; the next cycle
/// replaces it.
#[derive(Debug, Clone)]
pub struct IssueIndex {
    files: HashMap<PathBuf, BTreeMap<u32, Vec<Issue>>>,
    built_at: DateTime<Utc>,
}

impl IssueIndex {
    /// Create an empty index stamped with the current time
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            built_at: Utc::now(),
        }
    }

    /// Attribute an issue to a location
    ///
    /// **Public** - issues for the same location keep insertion order
    ///
    /// # Returns
    /// `false` if an issue with the same id is already recorded there
    pub fn insert(&mut self, path: PathBuf, line: u32, issue: Issue) -> bool {
        let issues = self
            .files
            .entry(path)
            .or_default()
            .entry(line)
            .or_default();

        if issues.iter().any(|existing| existing.id == issue.id) {
            return false;
        }

        issues.push(issue);
        true
    }

    /// Issues attributed to `path:line`, empty when there are none
    pub fn lookup(&self, path: &Path, line: u32) -> &[Issue] {
        self.files
            .get(path)
            .and_then(|lines| lines.get(&line))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All annotated lines of one file, in line order
    pub fn lines_for_file(&self, path: &Path) -> Option<&BTreeMap<u32, Vec<Issue>>> {
        self.files.get(path)
    }

    /// Every (file, line, issues) triple, files sorted by path
    pub fn entries(&self) -> Vec<(&Path, u32, &[Issue])> {
        let mut paths: Vec<&PathBuf> = self.files.keys().collect();
        paths.sort();

        paths
            .into_iter()
            .flat_map(|path| {
                self.files[path]
                    .iter()
                    .map(move |(line, issues)| (path.as_path(), *line, issues.as_slice()))
            })
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of (issue, location) attributions
    pub fn attribution_count(&self) -> usize {
        self.files
            .values()
            .flat_map(|lines| lines.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

impl Default for IssueIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn issue(id: &str) -> Issue {
        Issue {
            id: id.to_string(),
            short_id: format!("WEB-{}", id),
            title: format!("Error {}", id),
            event_count: "1".to_string(),
            permalink: format!("https://gt.example/issues/{}", id),
        }
    }

    #[test]
    fn test_insert_keeps_order_and_suppresses_duplicates() {
        let mut index = IssueIndex::new();
        let path = PathBuf::from("/ws/app/models/user.rb");

        assert!(index.insert(path.clone(), 12, issue("2")));
        assert!(index.insert(path.clone(), 12, issue("1")));
        assert!(!index.insert(path.clone(), 12, issue("2")));

        let ids: Vec<&str> = index.lookup(&path, 12).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(index.attribution_count(), 2);
    }

    #[test]
    fn test_same_issue_on_other_line_is_kept() {
        let mut index = IssueIndex::new();
        let path = PathBuf::from("/ws/src/a.ts");

        assert!(index.insert(path.clone(), 1, issue("7")));
        assert!(index.insert(path.clone(), 2, issue("7")));
        assert_eq!(index.attribution_count(), 2);
    }

    #[test]
    fn test_lookup_miss_is_empty() {
        let mut index = IssueIndex::new();
        index.insert(PathBuf::from("/ws/src/a.ts"), 5, issue("1"));

        assert!(index.lookup(Path::new("/ws/src/a.ts"), 6).is_empty());
        assert!(index.lookup(Path::new("/ws/src/b.ts"), 5).is_empty());
        assert!(IssueIndex::new().lookup(Path::new("/ws/src/a.ts"), 5).is_empty());
    }

    #[test]
    fn test_entries_sorted() {
        let mut index = IssueIndex::new();
        index.insert(PathBuf::from("/ws/b.rb"), 3, issue("1"));
        index.insert(PathBuf::from("/ws/a.rb"), 9, issue("2"));
        index.insert(PathBuf::from("/ws/a.rb"), 2, issue("3"));

        let keys: Vec<(String, u32)> = index
            .entries()
            .into_iter()
            .map(|(path, line, _)| (path.display().to_string(), line))
            .collect();

        assert_eq!(
            keys,
            vec![
                ("/ws/a.rb".to_string(), 2),
                ("/ws/a.rb".to_string(), 9),
                ("/ws/b.rb".to_string(), 3),
            ]
        );
        assert_eq!(index.file_count(), 2);
    }
}
