// Stable maximum binary heap over slot handles.
//
// Ordering key is (priority desc, sequence asc): among equal priorities the
// entry that was enqueued first is always extracted first.

/// One pending message as seen by the heap.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeapEntry {
    /// Caller supplied priority, higher is more urgent.
    pub priority: i32,
    /// Arrival stamp assigned by the queue at enqueue time.
    pub sequence: u64,
    /// Buffer store slot holding the payload.
    pub slot: usize,
}

impl HeapEntry {
    pub fn new(priority: i32, sequence: u64, slot: usize) -> Self {
        Self {
            priority,
            sequence,
            slot,
        }
    }

    /// True when `self` must leave the heap before `other`.
    ///
    /// Sequences are compared with serial-number arithmetic so that a
    /// wrapped counter still orders correctly as long as the live entries
    /// span less than `2^63` sequence numbers.
    #[inline]
    pub fn outranks(&self, other: &HeapEntry) -> bool {
        if self.priority != other.priority {
            return self.priority > other.priority;
        }
        sequence_before(self.sequence, other.sequence)
    }
}

/// `a` was issued before `b` under wrapping 64-bit arithmetic.
#[inline]
pub fn sequence_before(a: u64, b: u64) -> bool {
    (a.wrapping_sub(b) as i64) < 0
}

/// An index-based max-heap backed by a fixed array.
///
/// The array is allocated once in [`StableHeap::new`]; `insert` and
/// `extract_max` never allocate.
pub struct StableHeap {
    entries: Box<[HeapEntry]>,
    len: usize,
}

impl StableHeap {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![HeapEntry::default(); capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Push a new entry and sift it up.
    ///
    /// Returns `false` without touching the heap when it is already full.
    pub fn insert(&mut self, priority: i32, sequence: u64, slot: usize) -> bool {
        if self.is_full() {
            return false;
        }

        let mut index = self.len;
        self.entries[index] = HeapEntry::new(priority, sequence, slot);
        self.len += 1;

        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.entries[index].outranks(&self.entries[parent]) {
                break;
            }
            self.entries.swap(index, parent);
            index = parent;
        }
        true
    }

    /// Remove and return the root, or `None` when the heap is empty.
    pub fn extract_max(&mut self) -> Option<HeapEntry> {
        if self.len == 0 {
            return None;
        }

        let root = self.entries[0];
        self.len -= 1;
        if self.len > 0 {
            self.entries[0] = self.entries[self.len];
            self.sift_down(0);
        }
        Some(root)
    }

    /// Read-only access to the root.
    #[inline]
    pub fn peek_max(&self) -> Option<&HeapEntry> {
        if self.len == 0 {
            None
        } else {
            Some(&self.entries[0])
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            if left >= self.len {
                return;
            }
            let right = left + 1;

            // pick the child that would leave the heap first
            let mut best = left;
            if right < self.len && self.entries[right].outranks(&self.entries[left]) {
                best = right;
            }

            if !self.entries[best].outranks(&self.entries[index]) {
                return;
            }
            self.entries.swap(index, best);
            index = best;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.entries.len()
    }

    /// Drop every entry. The backing array is kept.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Iterate the occupied heap positions in array order (not priority order).
    pub fn iter(&self) -> impl Iterator<Item = &HeapEntry> {
        self.entries[..self.len].iter()
    }

    /// Check the heap property for every parent/child pair.
    pub fn is_valid_heap(&self) -> bool {
        self.iter()
            .enumerate()
            .skip(1)
            .all(|(child, entry)| !entry.outranks(&self.entries[(child - 1) / 2]))
    }
}
