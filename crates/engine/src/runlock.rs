use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

use crate::error::SyncError;

static ACTIVE_RUNS: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();

fn active_runs() -> &'static Mutex<HashSet<String>> {
    ACTIVE_RUNS.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Run-level single-flight guard. At most one sync cycle may hold the lock
/// for a given store identity; an overlapping invocation gets
/// `SyncError::SyncInProgress` instead of queueing. Released on drop.
pub struct RunLock {
    key: String,
}

impl RunLock {
    pub fn acquire(key: &str) -> Result<Self, SyncError> {
        let mut active = active_runs().lock().unwrap_or_else(|e| e.into_inner());
        if !active.insert(key.to_string()) {
            return Err(SyncError::SyncInProgress(key.to_string()));
        }
        Ok(Self { key: key.to_string() })
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let mut active = active_runs().lock().unwrap_or_else(|e| e.into_inner());
        active.remove(&self.key);
    }
}
