//! Mutable state owned by the poll loop

use std::time::{SystemTime, UNIX_EPOCH};

/// Remembers the last message sent so an unchanged one is not sent again
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupCache {
    last: Option<String>,
}

impl DedupCache {
    /// Record `message`, returning true if it differs from the previous one
    pub fn observe(&mut self, message: &str) -> bool {
        if self.last.as_deref() == Some(message) {
            return false;
        }
        self.last = Some(message.to_string());
        true
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

/// Cursor and dedup caches for one tracked submission
#[derive(Debug, Clone)]
pub struct PollState {
    /// Unix timestamp sent as `from_date` on the next fetch
    pub cursor: i64,
    pub last_status: DedupCache,
    pub last_error: DedupCache,
    pub consecutive_failures: u32,
}

impl PollState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            last_status: DedupCache::default(),
            last_error: DedupCache::default(),
            consecutive_failures: 0,
        }
    }

    /// State for a fresh process: cursor at the current time, caches empty
    pub fn starting_now() -> Self {
        Self::new(current_epoch_secs())
    }

    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Count a failed iteration and return the new streak length
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures += 1;
        self.consecutive_failures
    }
}

pub fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
