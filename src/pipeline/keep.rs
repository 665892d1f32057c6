// The keep set — handles that must never be unfollowed.
//
// Grows monotonically during a run: whitelist entries, every follower and
// every verified followed account are added, nothing is ever removed.
// Handles are compared case-insensitively without a leading '@', matching
// how the API treats screen names.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct KeepSet {
    handles: HashSet<String>,
}

impl KeepSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handle. Returns `false` if it was already present.
    pub fn insert(&mut self, handle: &str) -> bool {
        self.handles.insert(normalize(handle))
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.handles.contains(&normalize(handle))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<S: AsRef<str>> Extend<S> for KeepSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for handle in iter {
            self.insert(handle.as_ref());
        }
    }
}

fn normalize(handle: &str) -> String {
    handle.trim().trim_start_matches('@').to_ascii_lowercase()
}
