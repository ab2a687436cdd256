//! Coercer configuration

use attrkit_path::PathCache;
use serde::{Deserialize, Serialize};

/// Settings for a [`Coercer`](crate::Coercer)
///
/// Deserializable so hosts can embed it in their own JSON/YAML settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoercerConfig {
    /// Maximum number of memoized path parses
    pub path_cache_capacity: u64,
}

impl CoercerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With path cache capacity
    #[inline]
    #[must_use]
    pub fn with_path_cache_capacity(mut self, capacity: u64) -> Self {
        self.path_cache_capacity = capacity;
        self
    }
}

impl Default for CoercerConfig {
    fn default() -> Self {
        Self {
            path_cache_capacity: PathCache::DEFAULT_CAPACITY,
        }
    }
}
