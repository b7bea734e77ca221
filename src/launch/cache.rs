//! Time-bounded cache of installation detection results.
//!
//! Detection probes shell out to Spotlight and scan application
//! directories, which is too slow to repeat on every query. Entries expire
//! after [`DETECTION_CACHE_TTL`] and are recomputed lazily on the next
//! read; negative results are cached the same way so a genuinely absent
//! application is not re-probed within the TTL.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How long a detection result stays valid.
pub const DETECTION_CACHE_TTL: Duration = Duration::from_secs(60);

struct CacheEntry {
    installed: bool,
    recorded_at: Instant,
}

/// Maps application identifiers to their last-known installed state.
///
/// Per-key operations are independent last-write-wins; the cache is bounded
/// by the registry size, so expiry-on-read is the only eviction needed.
pub struct DetectionCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl DetectionCache {
    pub fn new() -> Self {
        Self::with_ttl(DETECTION_CACHE_TTL)
    }

    /// A cache with a custom expiry, for tests and diagnostics.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached state, or `None` if the entry is missing or has
    /// outlived the TTL.
    pub fn get(&self, key: &str) -> Option<bool> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(key)
            .filter(|entry| entry.recorded_at.elapsed() < self.ttl)
            .map(|entry| entry.installed)
    }

    /// Records a detection result with the current timestamp.
    pub fn set(&self, key: &str, installed: bool) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key.to_string(),
            CacheEntry {
                installed,
                recorded_at: Instant::now(),
            },
        );
    }

    /// Drops every entry; the next query re-probes. Used by diagnostics.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }
}

impl Default for DetectionCache {
    fn default() -> Self {
        Self::new()
    }
}
