//! Memoized path parsing using moka
//!
//! Repeated literal paths (`"line.width"`, `"marker.color"`) are parsed once
//! per cache and shared as `Arc<PropPath>`.

use crate::path::{PathError, PropPath};
use moka::sync::Cache;
use std::sync::Arc;

/// Bounded cache of parsed paths keyed by literal string
///
/// Failed parses are never cached.
#[derive(Debug, Clone)]
pub struct PathCache {
    inner: Cache<String, Arc<PropPath>>,
}

impl PathCache {
    /// Capacity used by [`Default`]
    pub const DEFAULT_CAPACITY: u64 = 1024;

    /// Create new cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Parse `path`, reusing an earlier parse of the same literal
    ///
    /// # Errors
    /// Returns [`PathError`] if the path is malformed
    pub fn parse(&self, path: &str) -> Result<Arc<PropPath>, PathError> {
        if let Some(hit) = self.inner.get(path) {
            return Ok(hit);
        }

        tracing::trace!(path, "path cache miss");
        let parsed = Arc::new(PropPath::parse(path)?);
        self.inner.insert(path.to_string(), Arc::clone(&parsed));
        Ok(parsed)
    }

    /// Check if a literal path is cached
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.inner.contains_key(path)
    }

    /// Number of cached paths
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    /// Drop every cached path
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_memoized() {
        let cache = PathCache::default();
        let first = cache.parse("marker.line.width").unwrap();
        let second = cache.parse("marker.line.width").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.contains("marker.line.width"));
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = PathCache::new(8);
        assert!(cache.parse("a[1").is_err());
        assert!(!cache.contains("a[1"));
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn invalidate_all_clears() {
        let cache = PathCache::new(8);
        cache.parse("a").unwrap();
        cache.parse("b[0]").unwrap();
        cache.invalidate_all();
        assert!(!cache.contains("a"));
        assert_eq!(cache.entry_count(), 0);
    }
}
