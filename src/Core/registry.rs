// Process-wide table of live queues, consulted by health monitoring

use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier handed to a queue when it is created.
pub type QueueId = u64;

lazy_static! {
    static ref LIVE_QUEUES: Mutex<BTreeMap<QueueId, String>> = Mutex::new(BTreeMap::new());
}

static NEXT_QUEUE_ID: AtomicU64 = AtomicU64::new(1);

/// Record a newly created queue.
pub fn register(name: &str) -> QueueId {
    let id = NEXT_QUEUE_ID.fetch_add(1, Ordering::Relaxed);
    LIVE_QUEUES.lock().insert(id, name.to_string());
    log::debug!("registry: queue '{}' registered as #{}", name, id);
    id
}

/// Forget a queue. Unknown ids are ignored.
pub fn unregister(id: QueueId) {
    if let Some(name) = LIVE_QUEUES.lock().remove(&id) {
        log::debug!("registry: queue '{}' (#{}) unregistered", name, id);
    }
}

/// Number of queues currently alive in this process.
pub fn queue_count() -> usize {
    LIVE_QUEUES.lock().len()
}

/// Names of the live queues, in creation order.
pub fn queue_names() -> Vec<String> {
    LIVE_QUEUES.lock().values().cloned().collect()
}
