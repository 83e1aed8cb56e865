mod builder;
mod consumer;
mod engine;
mod producer;

pub use builder::QueueBuilder;
pub use consumer::Consumer;
pub use engine::MessageQueue;
pub use producer::Producer;

pub mod Buffer {
    pub mod Buffer;
    pub mod Buffer_impl;
    pub use Buffer::SlotStore; // re-export for stable path
}

pub mod Heap {
    pub mod Heap;
    pub use Heap::{sequence_before, HeapEntry, StableHeap}; // re-export for stable path
}

pub mod Structs {
    pub mod Message_Structs;
    pub use Message_Structs::{
        BlockingMode, MessageMeta, QueueConfig, QueueState, DEFAULT_DEPTH, DEFAULT_MESSAGE_SIZE,
        DEFAULT_NAME,
    }; // re-export for stable path
}
