use crate::MsgQueue::Buffer::SlotStore;
use crate::MsgQueue::Heap::StableHeap;
use crate::MsgQueue::{Consumer, MessageQueue, Producer};
use std::fmt;

/// Debug function for MessageQueue
///
/// Uses only the lock-free snapshots, so formatting never blocks on a
/// thread that holds the queue lock.
pub fn debug_message_queue(queue: &MessageQueue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if !queue.is_created() {
        return f
            .debug_struct("MessageQueue")
            .field("created", &false)
            .finish();
    }
    f.debug_struct("MessageQueue")
        .field("name", &queue.name().unwrap_or_default())
        .field("id", &queue.id().unwrap_or_default())
        .field("capacity", &queue.capacity())
        .field("message_size", &queue.message_size())
        .field("occupancy", &queue.occupancy())
        .field("high_water_mark", &queue.high_water_mark())
        .field("state", &queue.state())
        .field("closed", &queue.is_closed())
        .finish()
}

/// Debug function for SlotStore
///
/// Shows the geometry and free count, never the payload bytes
pub fn debug_slot_store(store: &SlotStore, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SlotStore")
        .field("slot_count", &store.slot_count())
        .field("slot_size", &store.slot_size())
        .field("free", &store.free_count())
        .field("arena", &format_args!("{:p}", store.arena.as_ptr()))
        .finish()
}

/// Debug function for StableHeap
pub fn debug_stable_heap(heap: &StableHeap, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StableHeap")
        .field("len", &heap.len())
        .field("capacity", &heap.capacity())
        .field("root", &heap.peek_max())
        .finish_non_exhaustive()
}

// Debug proxy implementations that call the standalone debug functions

impl fmt::Debug for MessageQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_message_queue(self, f)
    }
}

impl fmt::Debug for SlotStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_slot_store(self, f)
    }
}

impl fmt::Debug for StableHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_stable_heap(self, f)
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer").field("queue", self.queue()).finish()
    }
}

impl fmt::Debug for Consumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer").field("queue", self.queue()).finish()
    }
}
