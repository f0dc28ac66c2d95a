//! Memory Tracking and Monitoring
//!
//! Accounts for every block a queue obtains so teardown can be audited, and
//! optionally refuses allocations to exercise the queue's failure paths.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Allocation accounting shared between a queue and whoever audits it
#[derive(Debug, Default)]
pub struct MemoryTracker {
    allocated_bytes: AtomicUsize,
    allocated_blocks: AtomicUsize,
    peak_bytes: AtomicUsize,
    requests: AtomicUsize,
    failure_interval: AtomicUsize,
    max_bytes: Option<usize>,
}

impl MemoryTracker {
    /// Create a new memory tracker with an optional byte limit
    pub fn new(max_bytes: Option<usize>) -> Self {
        Self {
            max_bytes,
            ..Self::default()
        }
    }

    /// Create a tracker that refuses every `interval`-th allocation request
    pub fn with_failure_interval(max_bytes: Option<usize>, interval: usize) -> Self {
        let tracker = Self::new(max_bytes);
        tracker.set_failure_interval(interval);
        tracker
    }

    /// Change the failure interval; 0 disables injected failures
    pub fn set_failure_interval(&self, interval: usize) {
        self.failure_interval.store(interval, Ordering::Relaxed);
        self.requests.store(0, Ordering::Relaxed);
    }

    pub fn failure_interval(&self) -> usize {
        self.failure_interval.load(Ordering::Relaxed)
    }

    /// Track allocation of one block of `bytes`. Returns false if the
    /// allocation must be treated as failed; nothing is recorded then.
    pub fn allocate(&self, bytes: usize) -> bool {
        let request = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        let interval = self.failure_interval();
        if interval > 0 && request % interval == 0 {
            return false;
        }

        let reserved = self
            .allocated_bytes
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                current
                    .checked_add(bytes)
                    .filter(|next| self.max_bytes.map_or(true, |max| *next <= max))
            });
        let Ok(previous) = reserved else {
            return false;
        };

        self.allocated_blocks.fetch_add(1, Ordering::Relaxed);
        self.peak_bytes.fetch_max(previous + bytes, Ordering::Relaxed);
        true
    }

    /// Track release of one block of `bytes`
    pub fn deallocate(&self, bytes: usize) {
        self.allocated_bytes.fetch_sub(bytes, Ordering::Relaxed);
        self.allocated_blocks.fetch_sub(1, Ordering::Relaxed);
    }

    /// Get current allocated bytes
    pub fn allocated_bytes(&self) -> usize {
        self.allocated_bytes.load(Ordering::Relaxed)
    }

    /// Get number of blocks not yet released
    pub fn allocated_blocks(&self) -> usize {
        self.allocated_blocks.load(Ordering::Relaxed)
    }

    /// Highest byte count observed since creation
    pub fn peak_bytes(&self) -> usize {
        self.peak_bytes.load(Ordering::Relaxed)
    }

    pub fn max_bytes(&self) -> Option<usize> {
        self.max_bytes
    }

    /// Get memory usage as percentage of the limit (0 when unlimited)
    pub fn usage_percent(&self) -> f64 {
        match self.max_bytes {
            Some(max) if max > 0 => (self.allocated_bytes() as f64 / max as f64) * 100.0,
            _ => 0.0,
        }
    }

    /// Check if memory usage exceeds threshold
    pub fn exceeds_threshold(&self, threshold_percent: f64) -> bool {
        self.usage_percent() > threshold_percent
    }
}
