//! Paths that bypass the session gate.
use std::collections::HashSet;

/// Exact-match set of request paths that need no login.
///
/// Built once from configuration and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ExemptionSet {
    paths: HashSet<String>,
}

impl ExemptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pattern: impl Into<String>) {
        self.paths.insert(pattern.into());
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExemptionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for ExemptionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for pattern in iter {
            self.add(pattern);
        }
    }
}
