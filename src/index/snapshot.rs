//! Publication of the current index to concurrent readers.
//!
//! Readers load an `Arc` to an immutable index without taking a lock. A
//! finished cycle replaces that `Arc` with one store, so readers see either
//! the old index or the new one, never a mix. If two cycles finish
//! concurrently the later store wins.

use super::issue_index::IssueIndex;
use crate::parser::schema::Issue;
use arc_swap::ArcSwap;
use log::debug;
use std::path::Path;
use std::sync::Arc;

/// Shared handle to the most recently published index
pub struct IndexHandle {
    current: ArcSwap<IssueIndex>,
}

impl IndexHandle {
    /// Start with an empty index
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(IssueIndex::new()),
        }
    }

    /// Replace the current index
    pub fn publish(&self, index: IssueIndex) {
        debug!(
            "Publishing index: {} files, {} attributions",
            index.file_count(),
            index.attribution_count()
        );
        self.current.store(Arc::new(index));
    }

    /// The current index, kept alive for as long as the caller holds it
    pub fn snapshot(&self) -> Arc<IssueIndex> {
        self.current.load_full()
    }

    /// Issues attributed to `path:line` in the current index
    ///
    /// **Public** - query entry point for hover providers
    pub fn lookup(&self, path: &Path, line: u32) -> Vec<Issue> {
        self.current.load().lookup(path, line).to_vec()
    }
}

impl Default for IndexHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::thread;

    fn issue(id: &str) -> Issue {
        Issue {
            id: id.to_string(),
            short_id: id.to_string(),
            title: String::new(),
            event_count: "1".to_string(),
            permalink: String::new(),
        }
    }

    #[test]
    fn test_starts_empty() {
        let handle = IndexHandle::new();
        assert!(handle.lookup(Path::new("/ws/a.rb"), 1).is_empty());
        assert!(handle.snapshot().is_empty());
    }

    #[test]
    fn test_publish_replaces_whole_index() {
        let handle = IndexHandle::new();

        let mut first = IssueIndex::new();
        first.insert(PathBuf::from("/ws/a.rb"), 1, issue("1"));
        handle.publish(first);

        let held = handle.snapshot();

        let mut second = IssueIndex::new();
        second.insert(PathBuf::from("/ws/b.rb"), 2, issue("2"));
        handle.publish(second);

        assert!(handle.lookup(Path::new("/ws/a.rb"), 1).is_empty());
        assert_eq!(handle.lookup(Path::new("/ws/b.rb"), 2).len(), 1);
        // An earlier snapshot is unaffected by later publishes
        assert_eq!(held.lookup(Path::new("/ws/a.rb"), 1).len(), 1);
    }

    #[test]
    fn test_readers_see_complete_indexes() {
        let handle = Arc::new(IndexHandle::new());

        let writer = {
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                for round in 0..200u32 {
                    let mut index = IssueIndex::new();
                    index.insert(PathBuf::from("/ws/a.rb"), 1, issue(&round.to_string()));
                    index.insert(PathBuf::from("/ws/b.rb"), 1, issue(&round.to_string()));
                    handle.publish(index);
                }
            })
        };

        for _ in 0..200 {
            let snapshot = handle.snapshot();
            let a = snapshot.lookup(Path::new("/ws/a.rb"), 1);
            let b = snapshot.lookup(Path::new("/ws/b.rb"), 1);
            assert_eq!(a, b);
        }

        writer.join().unwrap();
    }
}
