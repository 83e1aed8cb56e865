use super::Buffer::SlotStore;
use crate::Core::error::{QueueError, QueueResult};

impl SlotStore {
    /// Allocate storage for `slot_count` payloads of at most `slot_size` bytes.
    ///
    /// This is the only allocation the store ever performs.
    pub fn new(slot_count: usize, slot_size: usize) -> Self {
        // Free stack is filled so that slot 0 is handed out first.
        let free: Box<[usize]> = (0..slot_count).rev().collect();

        Self {
            arena: vec![0u8; slot_count * slot_size].into_boxed_slice(),
            lengths: vec![0usize; slot_count].into_boxed_slice(),
            in_use: vec![false; slot_count].into_boxed_slice(),
            free,
            free_len: slot_count,
            slot_size,
        }
    }

    #[inline]
    fn range(&self, slot: usize) -> std::ops::Range<usize> {
        let start = slot * self.slot_size;
        start..start + self.slot_size
    }

    /// Take a free slot out of the pool, or `None` when every slot is in use.
    pub fn acquire_free_slot(&mut self) -> Option<usize> {
        if self.free_len == 0 {
            return None;
        }
        self.free_len -= 1;
        let slot = self.free[self.free_len];
        debug_assert!(!self.in_use[slot], "free list handed out a live slot");
        self.in_use[slot] = true;
        Some(slot)
    }

    /// Return a slot to the pool.
    ///
    /// # Panics
    /// Panics if `slot` is out of range or not currently in use. Either means
    /// the heap and the store no longer agree, which cannot be repaired.
    pub fn release(&mut self, slot: usize) {
        assert!(
            slot < self.in_use.len() && self.in_use[slot],
            "SlotStore::release(): slot {} is not in use",
            slot
        );
        self.in_use[slot] = false;
        self.lengths[slot] = 0;
        self.free[self.free_len] = slot;
        self.free_len += 1;
    }

    /// Copy `payload` into `slot`.
    pub fn write(&mut self, slot: usize, payload: &[u8]) -> QueueResult<()> {
        if payload.len() > self.slot_size {
            return Err(QueueError::SizeError {
                len: payload.len(),
                max: self.slot_size,
            });
        }
        debug_assert!(self.in_use[slot], "write into a free slot");

        let range = self.range(slot);
        self.arena[range.start..range.start + payload.len()].copy_from_slice(payload);
        self.lengths[slot] = payload.len();
        Ok(())
    }

    /// Borrow the bytes stored in `slot`.
    #[inline]
    pub fn payload(&self, slot: usize) -> &[u8] {
        let start = self.range(slot).start;
        &self.arena[start..start + self.lengths[slot]]
    }

    /// Copy the payload of `slot` out into a freshly owned buffer.
    pub fn read(&self, slot: usize) -> Vec<u8> {
        self.payload(slot).to_vec()
    }

    /// Copy the payload of `slot` into `out`, returning the byte count.
    ///
    /// Never allocates.
    pub fn read_into(&self, slot: usize, out: &mut [u8]) -> QueueResult<usize> {
        let payload = self.payload(slot);
        if payload.len() > out.len() {
            return Err(QueueError::BufferTooSmall {
                len: payload.len(),
                capacity: out.len(),
            });
        }
        out[..payload.len()].copy_from_slice(payload);
        Ok(payload.len())
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.lengths.len()
    }

    #[inline]
    pub fn slot_size(&self) -> usize {
        self.slot_size
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.free_len
    }

    #[inline]
    pub fn is_in_use(&self, slot: usize) -> bool {
        self.in_use.get(slot).copied().unwrap_or(false)
    }
}
