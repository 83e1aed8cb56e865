// The queue engine: heap + slot store behind one monitor

use crate::Core::error::{QueueError, QueueResult};
use crate::Core::registry::{self, QueueId};
use crate::MsgQueue::Buffer::SlotStore;
use crate::MsgQueue::Heap::StableHeap;
use crate::MsgQueue::Structs::{BlockingMode, MessageMeta, QueueConfig, QueueState};
use crossbeam_utils::CachePadded;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// How long an operation may wait for its precondition.
#[derive(Copy, Clone, Debug)]
enum Wait {
    No,
    Forever,
    Until(Instant),
}

impl From<BlockingMode> for Wait {
    fn from(mode: BlockingMode) -> Self {
        match mode {
            BlockingMode::Blocking => Wait::Forever,
            BlockingMode::NonBlocking => Wait::No,
        }
    }
}

impl Wait {
    fn after(timeout: Duration) -> Self {
        // A deadline too far out to represent is the same as no deadline.
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Wait::Until(deadline),
            None => Wait::Forever,
        }
    }
}

/// State guarded by the queue lock.
pub(crate) struct QueueCore {
    pub(crate) heap: StableHeap,
    pub(crate) store: SlotStore,
    pub(crate) next_sequence: u64,
    pub(crate) closed: bool,
}

impl QueueCore {
    fn new(config: &QueueConfig) -> Self {
        Self {
            heap: StableHeap::new(config.depth),
            store: SlotStore::new(config.depth, config.message_size),
            next_sequence: 0,
            closed: false,
        }
    }

    #[inline]
    fn has_space(&self) -> bool {
        self.store.free_count() > 0
    }

    /// Store `payload` and push it onto the heap. Caller checked `has_space`.
    fn enqueue(&mut self, payload: &[u8], priority: i32) -> QueueResult<u64> {
        let slot = match self.store.acquire_free_slot() {
            Some(slot) => slot,
            None => panic!("MessageQueue: no free slot although space was reported"),
        };
        if let Err(e) = self.store.write(slot, payload) {
            self.store.release(slot);
            return Err(e);
        }

        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);

        let inserted = self.heap.insert(priority, sequence, slot);
        assert!(inserted, "MessageQueue: heap full while the slot store had room");
        self.check_sync();
        Ok(sequence)
    }

    /// Pop the root and hand its slot to `copy_out` before releasing it.
    fn dequeue_with<R>(&mut self, copy_out: impl FnOnce(&SlotStore, usize) -> R) -> (MessageMeta, R) {
        let entry = match self.heap.extract_max() {
            Some(entry) => entry,
            None => panic!("MessageQueue: dequeue on an empty heap"),
        };
        assert!(
            self.store.is_in_use(entry.slot),
            "MessageQueue: heap referenced free slot {}",
            entry.slot
        );

        let meta = MessageMeta {
            priority: entry.priority,
            sequence: entry.sequence,
            payload_len: self.store.payload(entry.slot).len(),
        };
        let out = copy_out(&self.store, entry.slot);
        self.store.release(entry.slot);
        self.check_sync();
        (meta, out)
    }

    #[inline]
    fn check_sync(&self) {
        assert_eq!(
            self.heap.len() + self.store.free_count(),
            self.store.slot_count(),
            "MessageQueue: heap and slot store out of sync"
        );
        debug_assert!(self.heap.is_valid_heap());
    }
}

/// Storage, lock and wait conditions of a created queue.
pub(crate) struct QueueInner {
    pub(crate) id: QueueId,
    pub(crate) config: QueueConfig,
    pub(crate) core: Mutex<QueueCore>,
    /// Signalled when a message is added.
    pub(crate) not_empty: Condvar,
    /// Signalled when a slot is freed.
    pub(crate) not_full: Condvar,
    /// Lock-free snapshots for telemetry.
    pub(crate) occupancy: CachePadded<AtomicUsize>,
    pub(crate) high_water: CachePadded<AtomicUsize>,
    pub(crate) closed: AtomicBool,
}

impl QueueInner {
    #[inline]
    fn publish_occupancy(&self, occupancy: usize) {
        self.occupancy.store(occupancy, Ordering::Release);
        self.high_water.fetch_max(occupancy, Ordering::AcqRel);
    }

    /// Block on `cond` according to `wait`. Returns `false` once the deadline
    /// has passed or when waiting is not allowed.
    fn wait_on(cond: &Condvar, guard: &mut MutexGuard<'_, QueueCore>, wait: Wait) -> bool {
        match wait {
            Wait::No => false,
            Wait::Forever => {
                cond.wait(guard);
                true
            }
            Wait::Until(deadline) => {
                if Instant::now() >= deadline {
                    return false;
                }
                // A timed out wait still re-checks the condition once.
                cond.wait_until(guard, deadline);
                true
            }
        }
    }
}

impl Drop for QueueInner {
    fn drop(&mut self) {
        registry::unregister(self.id);
    }
}

/// A bounded priority message queue shared between threads.
///
/// Messages with a higher priority are received first; messages of equal
/// priority are received in the order they were sent. Payloads are copied
/// in on send and copied out on receive, so the caller never aliases the
/// queue's storage.
///
/// ### Lifecycle:
/// A queue starts *uncreated* ([`MessageQueue::new`]) and becomes usable after
/// [`MessageQueue::create`]; until then every operation returns
/// [`QueueError::Uninitialized`]. [`QueueBuilder`](crate::MsgQueue::QueueBuilder)
/// does both steps at once.
///
/// ### Concurrency Design:
/// One `parking_lot::Mutex` guards the heap, the slot store and the sequence
/// counter. Blocking senders wait on `not_full`, blocking receivers on
/// `not_empty`; both waits release the lock atomically. Each successful
/// operation wakes one waiter of the opposite kind; `parking_lot` hands the
/// wake-up to the longest waiting thread, and its eventual fairness keeps a
/// newly arriving caller from barging ahead indefinitely.
#[derive(Default)]
pub struct MessageQueue {
    pub(crate) inner: Option<QueueInner>,
}

impl MessageQueue {
    /// An uncreated queue.
    pub fn new() -> Self {
        Self { inner: None }
    }

    /// Allocate storage for `config`. Can only succeed once per queue.
    pub fn create(&mut self, config: QueueConfig) -> QueueResult<()> {
        if self.inner.is_some() {
            return Err(QueueError::AlreadyCreated);
        }
        config.validate()?;

        let core = QueueCore::new(&config);
        let id = registry::register(&config.name);
        log::debug!(
            "queue '{}' created: depth={} message_size={}",
            config.name,
            config.depth,
            config.message_size
        );

        self.inner = Some(QueueInner {
            id,
            config,
            core: Mutex::new(core),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            occupancy: CachePadded::new(AtomicUsize::new(0)),
            high_water: CachePadded::new(AtomicUsize::new(0)),
            closed: AtomicBool::new(false),
        });
        Ok(())
    }

    #[inline]
    fn inner(&self) -> QueueResult<&QueueInner> {
        self.inner.as_ref().ok_or(QueueError::Uninitialized)
    }

    /// Send `payload` with `priority`.
    ///
    /// In blocking mode a full queue suspends the caller until a receive frees
    /// a slot. In non-blocking mode a full queue returns [`QueueError::Full`].
    pub fn send(&self, payload: &[u8], priority: i32, mode: BlockingMode) -> QueueResult<()> {
        self.send_wait(payload, priority, mode.into())
    }

    /// Like a blocking [`send`](Self::send) but gives up with
    /// [`QueueError::Full`] after `timeout`.
    pub fn send_timeout(&self, payload: &[u8], priority: i32, timeout: Duration) -> QueueResult<()> {
        self.send_wait(payload, priority, Wait::after(timeout))
    }

    fn send_wait(&self, payload: &[u8], priority: i32, wait: Wait) -> QueueResult<()> {
        let inner = self.inner()?;

        // Size is a precondition and is checked before any wait.
        if payload.len() > inner.config.message_size {
            log::warn!(
                "queue '{}': rejected {} byte payload (max {})",
                inner.config.name,
                payload.len(),
                inner.config.message_size
            );
            return Err(QueueError::SizeError {
                len: payload.len(),
                max: inner.config.message_size,
            });
        }

        let mut core = inner.core.lock();
        loop {
            if core.closed {
                return Err(QueueError::Closed);
            }
            if core.has_space() {
                break;
            }
            if !QueueInner::wait_on(&inner.not_full, &mut core, wait) {
                return Err(QueueError::Full);
            }
        }

        let sequence = core.enqueue(payload, priority)?;
        let occupancy = core.heap.len();
        inner.publish_occupancy(occupancy);
        drop(core);

        inner.not_empty.notify_one();
        log::trace!(
            "queue '{}': sent seq={} priority={} len={} occupancy={}",
            inner.config.name,
            sequence,
            priority,
            payload.len(),
            occupancy
        );
        Ok(())
    }

    /// Receive the highest priority, oldest message.
    ///
    /// In blocking mode an empty queue suspends the caller until a message is
    /// sent. In non-blocking mode an empty queue returns [`QueueError::Empty`].
    pub fn receive(&self, mode: BlockingMode) -> QueueResult<(MessageMeta, Vec<u8>)> {
        self.receive_wait(mode.into(), |core| {
            Ok(core.dequeue_with(|store, slot| store.read(slot)))
        })
    }

    /// Like a blocking [`receive`](Self::receive) but gives up with
    /// [`QueueError::Empty`] after `timeout`.
    pub fn receive_timeout(&self, timeout: Duration) -> QueueResult<(MessageMeta, Vec<u8>)> {
        self.receive_wait(Wait::after(timeout), |core| {
            Ok(core.dequeue_with(|store, slot| store.read(slot)))
        })
    }

    /// Receive into a caller supplied buffer without allocating.
    ///
    /// If `out` is shorter than the next message, [`QueueError::BufferTooSmall`]
    /// is returned and the message stays queued.
    pub fn receive_into(&self, out: &mut [u8], mode: BlockingMode) -> QueueResult<MessageMeta> {
        self.receive_wait(mode.into(), |core| {
            let next = match core.heap.peek_max() {
                Some(entry) => entry.slot,
                None => return Err(QueueError::Empty),
            };
            let len = core.store.payload(next).len();
            if len > out.len() {
                return Err(QueueError::BufferTooSmall {
                    len,
                    capacity: out.len(),
                });
            }
            let (meta, copied) = core.dequeue_with(|store, slot| store.read_into(slot, out));
            copied?;
            Ok(meta)
        })
    }

    fn receive_wait<R>(
        &self,
        wait: Wait,
        take: impl FnOnce(&mut QueueCore) -> QueueResult<R>,
    ) -> QueueResult<R> {
        let inner = self.inner()?;

        let mut core = inner.core.lock();
        loop {
            // Pending messages are still delivered after close.
            if !core.heap.is_empty() {
                break;
            }
            if core.closed {
                return Err(QueueError::Closed);
            }
            if !QueueInner::wait_on(&inner.not_empty, &mut core, wait) {
                return Err(QueueError::Empty);
            }
        }

        let taken = match take(&mut *core) {
            Ok(taken) => taken,
            Err(e) => {
                // The message is still queued; hand our wake-up to the next receiver.
                let pending = !core.heap.is_empty();
                drop(core);
                if pending {
                    inner.not_empty.notify_one();
                }
                return Err(e);
            }
        };
        let occupancy = core.heap.len();
        inner.publish_occupancy(occupancy);
        drop(core);

        inner.not_full.notify_one();
        log::trace!(
            "queue '{}': received, occupancy={}",
            inner.config.name,
            occupancy
        );
        Ok(taken)
    }

    /// Close the queue and wake every waiter.
    ///
    /// Senders get [`QueueError::Closed`] from now on. Receivers drain what is
    /// still queued and then get [`QueueError::Closed`].
    pub fn close(&self) -> QueueResult<()> {
        let inner = self.inner()?;
        {
            let mut core = inner.core.lock();
            if core.closed {
                return Ok(());
            }
            core.closed = true;
            inner.closed.store(true, Ordering::Release);
        }
        inner.not_empty.notify_all();
        inner.not_full.notify_all();
        log::debug!("queue '{}' closed", inner.config.name);
        Ok(())
    }

    /// Messages currently queued. Best-effort snapshot, 0 if uncreated.
    pub fn occupancy(&self) -> usize {
        self.inner
            .as_ref()
            .map_or(0, |inner| inner.occupancy.load(Ordering::Acquire))
    }

    /// Number of message slots, 0 if uncreated.
    pub fn capacity(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| inner.config.depth)
    }

    /// Largest accepted payload in bytes, 0 if uncreated.
    pub fn message_size(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| inner.config.message_size)
    }

    /// Highest occupancy ever observed.
    pub fn high_water_mark(&self) -> usize {
        self.inner
            .as_ref()
            .map_or(0, |inner| inner.high_water.load(Ordering::Acquire))
    }

    pub fn state(&self) -> QueueState {
        QueueState::from_occupancy(self.occupancy(), self.capacity())
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.as_ref().map(|inner| inner.config.name.as_str())
    }

    pub fn id(&self) -> Option<QueueId> {
        self.inner.as_ref().map(|inner| inner.id)
    }

    pub fn is_created(&self) -> bool {
        self.inner.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|inner| inner.closed.load(Ordering::Acquire))
    }
}
