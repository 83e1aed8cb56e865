// src/MsgQueue/consumer.rs

use super::Structs::{BlockingMode, MessageMeta};
use super::MessageQueue;
use crate::Core::error::QueueError;
use std::sync::Arc;
use std::time::Duration;

/// A receiving handle onto a shared [`MessageQueue`].
#[derive(Clone)]
pub struct Consumer {
    queue: Arc<MessageQueue>,
}

impl Consumer {
    pub fn new(queue: Arc<MessageQueue>) -> Self {
        Self { queue }
    }

    /// Receives a message if one is available.
    ///
    /// # Returns
    /// * `Ok(Some(data))` if a message was received
    /// * `Ok(None)` if no message is available
    /// * `Err(io::Error)` if the queue was closed and drained
    pub fn receive(&self) -> std::io::Result<Option<Vec<u8>>> {
        self.receive_with_meta()
            .map(|opt| opt.map(|(_, payload)| payload))
    }

    /// Receives a message and its metadata if one is available.
    pub fn receive_with_meta(&self) -> std::io::Result<Option<(MessageMeta, Vec<u8>)>> {
        match self.queue.receive(BlockingMode::NonBlocking) {
            Ok(message) => Ok(Some(message)),
            Err(QueueError::Empty) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Receives a message, blocking until one is available or the queue closes.
    pub fn receive_blocking(&self) -> std::io::Result<Vec<u8>> {
        self.receive_blocking_with_meta()
            .map(|(_, payload)| payload)
    }

    /// Receives a message and metadata, blocking until one is available.
    pub fn receive_blocking_with_meta(&self) -> std::io::Result<(MessageMeta, Vec<u8>)> {
        self.queue
            .receive(BlockingMode::Blocking)
            .map_err(Into::into)
    }

    /// Receives a message, waiting up to the specified timeout.
    ///
    /// # Returns
    /// * `Ok(Some(data))` if a message was received
    /// * `Ok(None)` if the timeout was reached
    /// * `Err(io::Error)` if the queue was closed and drained
    pub fn receive_timeout(&self, timeout: Duration) -> std::io::Result<Option<Vec<u8>>> {
        match self.queue.receive_timeout(timeout) {
            Ok((_, payload)) => Ok(Some(payload)),
            Err(QueueError::Empty) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn queue(&self) -> &Arc<MessageQueue> {
        &self.queue
    }
}
