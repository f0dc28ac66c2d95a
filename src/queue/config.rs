//! Queue Configuration Module
//!
//! Provides configuration structures for queue construction and for the
//! driver that exercises it, integrating with the application's
//! configuration discovery.

use serde::{Deserialize, Serialize};

use crate::queue::{QueueError, QueueResult};

/// Default size of the buffer removed values are copied into
pub const DEFAULT_REMOVE_BUFFER: usize = 1024;

/// Largest removal buffer the driver will allocate
pub const MAX_REMOVE_BUFFER: usize = 1 << 20;

/// Default number of elements printed before the listing is elided
pub const DEFAULT_MAX_SHOW: usize = 30;

/// Main queue configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Byte budget for nodes and values; unlimited when absent
    pub memory_limit: Option<usize>,

    /// Every n-th allocation request fails; 0 disables
    pub fail_interval: usize,

    /// Capacity of the removal buffer, terminator included
    pub remove_buffer: usize,

    /// Elements shown before eliding the rest
    pub max_show: usize,

    /// Node slots reserved when the queue is created
    pub initial_capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            memory_limit: None,
            fail_interval: 0,
            remove_buffer: DEFAULT_REMOVE_BUFFER,
            max_show: DEFAULT_MAX_SHOW,
            initial_capacity: 0,
        }
    }
}

impl QueueConfig {
    /// Validate configuration values
    pub fn validate(&self) -> QueueResult<()> {
        if self.remove_buffer == 0 {
            return Err(QueueError::invalid_argument(
                "remove buffer must hold at least the terminator",
            ));
        }
        if self.remove_buffer > MAX_REMOVE_BUFFER {
            return Err(QueueError::invalid_argument(format!(
                "remove buffer of {} bytes exceeds the maximum of {}",
                self.remove_buffer, MAX_REMOVE_BUFFER
            )));
        }
        if self.memory_limit == Some(0) {
            return Err(QueueError::invalid_argument("memory limit must be greater than 0"));
        }
        Ok(())
    }
}
