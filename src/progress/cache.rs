//! Process-wide progress cache keyed by execution identity.
//!
//! The running algorithm writes through a [`ProgressHandle`]; status pollers read
//! the cache from other threads. The lock is held only for each single read or write.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::algorithm::ProgressReceiver;
use crate::error::ProgressError;

#[derive(Debug, Default)]
pub struct ProgressCache {
    entries: RwLock<HashMap<String, f32>>,
}

impl ProgressCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Record `progress` for `key`; values outside `[0, 1]` are rejected
    pub fn update_progress(&self, key: &str, progress: f32) -> Result<(), ProgressError> {
        if !(0.0..=1.0).contains(&progress) {
            return Err(ProgressError::OutOfRange(progress));
        }
        trace!(key, progress, "Progress update");
        self.entries.write().insert(key.to_string(), progress);
        Ok(())
    }

    /// Last recorded progress, `None` before the first update
    pub fn get_progress(&self, key: &str) -> Option<f32> {
        self.entries.read().get(key).copied()
    }

    /// Start a new execution under `key`
    pub fn reset(&self, key: &str) {
        self.entries.write().insert(key.to_string(), 0.0);
    }

    pub fn remove(&self, key: &str) -> Option<f32> {
        self.entries.write().remove(key)
    }

    /// Snapshot of every tracked execution
    pub fn snapshot(&self) -> HashMap<String, f32> {
        self.entries.read().clone()
    }

    /// Handle bound to one execution key
    pub fn handle(self: &Arc<Self>, key: impl Into<String>) -> ProgressHandle {
        ProgressHandle {
            cache: Arc::clone(self),
            key: key.into(),
        }
    }
}

/// Progress receiver handed to an algorithm for one execution
#[derive(Debug, Clone)]
pub struct ProgressHandle {
    cache: Arc<ProgressCache>,
    key: String,
}

impl ProgressHandle {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl ProgressReceiver for ProgressHandle {
    fn update_progress(&self, progress: f32) -> Result<(), ProgressError> {
        self.cache.update_progress(&self.key, progress)
    }
}
