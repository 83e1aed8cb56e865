// src/MsgQueue/producer.rs
use super::Structs::BlockingMode;
use super::MessageQueue;
use std::sync::Arc;
use std::time::Duration;

/// A sending handle onto a shared [`MessageQueue`].
///
/// Cheap to clone; every clone feeds the same queue.
#[derive(Clone)]
pub struct Producer {
    queue: Arc<MessageQueue>,
}

impl Producer {
    pub fn new(queue: Arc<MessageQueue>) -> Self {
        Self { queue }
    }

    /// Sends a message without waiting.
    ///
    /// # Arguments
    /// * `message` - The payload to send
    /// * `priority` - Higher values are received first
    ///
    /// # Returns
    /// * `Ok(())` if the message was queued
    /// * `Err(io::Error)` with `WouldBlock` if the queue is full, `InvalidInput`
    ///   if the message is too large, `BrokenPipe` if the queue was closed
    pub fn send<T: AsRef<[u8]>>(&self, message: T, priority: i32) -> std::io::Result<()> {
        self.queue
            .send(message.as_ref(), priority, BlockingMode::NonBlocking)
            .map_err(Into::into)
    }

    /// Sends a message, waiting for a free slot if the queue is full.
    pub fn send_blocking<T: AsRef<[u8]>>(&self, message: T, priority: i32) -> std::io::Result<()> {
        self.queue
            .send(message.as_ref(), priority, BlockingMode::Blocking)
            .map_err(Into::into)
    }

    /// Sends a message, waiting at most `timeout` for a free slot.
    pub fn send_timeout<T: AsRef<[u8]>>(
        &self,
        message: T,
        priority: i32,
        timeout: Duration,
    ) -> std::io::Result<()> {
        self.queue
            .send_timeout(message.as_ref(), priority, timeout)
            .map_err(Into::into)
    }

    /// Returns the maximum message size that can be sent
    pub fn max_message_size(&self) -> usize {
        self.queue.message_size()
    }

    pub fn queue(&self) -> &Arc<MessageQueue> {
        &self.queue
    }
}
