// Module naming follows project convention (MsgQueue = stable-priority message queue)
#[allow(non_snake_case)]
pub mod MsgQueue;

#[allow(non_snake_case)]
pub mod Core {
    pub mod error;
    pub mod registry;
    pub use error::{QueueError, QueueResult};
    pub use registry::{queue_count, queue_names, QueueId};
}

#[allow(non_snake_case)]
pub mod Debug {
    pub mod StructDebug;
}

pub mod ffi;

pub use Core::{QueueError, QueueResult};
pub use MsgQueue::Structs::{BlockingMode, MessageMeta, QueueConfig, QueueState};
pub use MsgQueue::{Consumer, MessageQueue, Producer, QueueBuilder};
