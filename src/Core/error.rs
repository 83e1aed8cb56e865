use std::io;
use thiserror::Error;

/// Every outcome of a queue operation other than success.
///
/// `Full`, `Empty` and `Closed` are expected conditions the caller decides
/// how to handle. `SizeError`, `Uninitialized`, `AlreadyCreated`,
/// `InvalidConfig` and `BufferTooSmall` are caller bugs; the queue state is
/// left unchanged when one of them is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("payload of {len} bytes exceeds the maximum message size of {max}")]
    SizeError { len: usize, max: usize },

    #[error("queue is full")]
    Full,

    #[error("queue is empty")]
    Empty,

    #[error("queue has not been created")]
    Uninitialized,

    #[error("queue has already been created")]
    AlreadyCreated,

    #[error("invalid queue configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("receive buffer of {capacity} bytes cannot hold a {len} byte message")]
    BufferTooSmall { len: usize, capacity: usize },

    #[error("queue has been closed")]
    Closed,
}

impl QueueError {
    /// True for the conditions a caller is expected to retry or wait out.
    pub fn is_transient(&self) -> bool {
        matches!(self, QueueError::Full | QueueError::Empty)
    }
}

impl From<QueueError> for io::Error {
    fn from(err: QueueError) -> Self {
        let kind = match err {
            QueueError::Full | QueueError::Empty => io::ErrorKind::WouldBlock,
            QueueError::SizeError { .. }
            | QueueError::InvalidConfig(_)
            | QueueError::BufferTooSmall { .. } => io::ErrorKind::InvalidInput,
            QueueError::Uninitialized => io::ErrorKind::NotConnected,
            QueueError::AlreadyCreated => io::ErrorKind::AlreadyExists,
            QueueError::Closed => io::ErrorKind::BrokenPipe,
        };
        io::Error::new(kind, err)
    }
}

pub type QueueResult<T> = Result<T, QueueError>;
