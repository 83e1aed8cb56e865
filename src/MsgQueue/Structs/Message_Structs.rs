// Plain data carried alongside payloads and used to configure a queue

use crate::Core::error::{QueueError, QueueResult};

/// Default number of message slots.
pub const DEFAULT_DEPTH: usize = 64;

/// Default maximum payload size in bytes.
pub const DEFAULT_MESSAGE_SIZE: usize = 256;

/// Default queue name.
pub const DEFAULT_NAME: &str = "queue";

/// Metadata returned with every received payload.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageMeta {
    /// Priority the sender attached to the message.
    pub priority: i32,
    /// Arrival stamp assigned by the queue.
    pub sequence: u64,
    pub payload_len: usize,
}

/// Whether an operation may suspend the calling thread.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockingMode {
    /// Wait until space (send) or data (receive) is available.
    Blocking,
    /// Return `Full` / `Empty` immediately instead of waiting.
    NonBlocking,
}

impl From<bool> for BlockingMode {
    fn from(blocking: bool) -> Self {
        if blocking {
            BlockingMode::Blocking
        } else {
            BlockingMode::NonBlocking
        }
    }
}

/// Occupancy-derived state of a queue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QueueState {
    Empty,
    Partial,
    Full,
}

impl QueueState {
    pub fn from_occupancy(occupancy: usize, capacity: usize) -> Self {
        if occupancy == 0 {
            QueueState::Empty
        } else if occupancy >= capacity {
            QueueState::Full
        } else {
            QueueState::Partial
        }
    }
}

/// Construction parameters, fixed for the lifetime of a queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    pub name: String,
    /// Number of message slots.
    pub depth: usize,
    /// Maximum payload size in bytes.
    pub message_size: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            depth: DEFAULT_DEPTH,
            message_size: DEFAULT_MESSAGE_SIZE,
        }
    }
}

impl QueueConfig {
    pub fn new(name: impl Into<String>, depth: usize, message_size: usize) -> Self {
        Self {
            name: name.into(),
            depth,
            message_size,
        }
    }

    pub fn validate(&self) -> QueueResult<()> {
        if self.depth == 0 {
            return Err(QueueError::InvalidConfig("depth must be greater than zero"));
        }
        if self.message_size == 0 {
            return Err(QueueError::InvalidConfig(
                "message size must be greater than zero",
            ));
        }
        if self.depth.checked_mul(self.message_size).is_none() {
            return Err(QueueError::InvalidConfig(
                "depth * message size overflows the address space",
            ));
        }
        Ok(())
    }
}
