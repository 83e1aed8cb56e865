use super::Structs::{QueueConfig, DEFAULT_DEPTH, DEFAULT_MESSAGE_SIZE, DEFAULT_NAME};
use super::{Consumer, MessageQueue, Producer};
use crate::Core::error::QueueResult;
use std::sync::Arc;

pub struct QueueBuilder {
    name: String,
    depth: usize,
    message_size: usize,
}

impl Default for QueueBuilder {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            depth: DEFAULT_DEPTH,
            message_size: DEFAULT_MESSAGE_SIZE,
        }
    }
}

impl QueueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of message slots.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Largest payload, in bytes, a single message may carry.
    pub fn with_message_size(mut self, size: usize) -> Self {
        self.message_size = size;
        self
    }

    pub fn config(&self) -> QueueConfig {
        QueueConfig::new(self.name.clone(), self.depth, self.message_size)
    }

    pub fn build(self) -> QueueResult<MessageQueue> {
        let mut queue = MessageQueue::new();
        queue.create(self.config())?;
        Ok(queue)
    }

    pub fn build_shared(self) -> QueueResult<Arc<MessageQueue>> {
        self.build().map(Arc::new)
    }

    /// Build a queue and hand out one producer and one consumer for it.
    /// Both handles can be cloned for more senders or receivers.
    pub fn build_pair(self) -> std::io::Result<(Producer, Consumer)> {
        let queue = self.build_shared()?;
        Ok((Producer::new(Arc::clone(&queue)), Consumer::new(queue)))
    }
}
