// Fixed-slot payload storage for one queue - carved into `slot_count` slots

/// Preallocated payload storage.
///
/// This struct owns no synchronization. The queue engine only touches it
/// while holding its lock.
///
/// ### Layout:
/// - **arena**: `slot_count * slot_size` contiguous bytes. Slot `k` occupies
///   `arena[k * slot_size .. (k + 1) * slot_size]`.
/// - **lengths**: number of valid bytes currently stored in each slot.
/// - **free stack**: indices of free slots; `free[..free_len]` is the pool.
///   Acquire pops, release pushes, both O(1).
pub struct SlotStore {
    /// Payload bytes for every slot.
    pub(crate) arena: Box<[u8]>,

    /// Valid byte count per slot.
    pub(crate) lengths: Box<[usize]>,

    /// In-use flag per slot, used to catch double release.
    pub(crate) in_use: Box<[bool]>,

    /// Stack of free slot indices.
    pub(crate) free: Box<[usize]>,

    /// Number of live entries at the bottom of `free`.
    pub(crate) free_len: usize,

    /// Maximum payload size of one slot in bytes.
    pub(crate) slot_size: usize,
}
