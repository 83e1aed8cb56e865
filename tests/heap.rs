use rtmq::MsgQueue::Heap::{sequence_before, HeapEntry, StableHeap};

fn drain(heap: &mut StableHeap) -> Vec<HeapEntry> {
    let mut out = Vec::new();
    while let Some(entry) = heap.extract_max() {
        assert!(heap.is_valid_heap());
        out.push(entry);
    }
    out
}

#[test]
fn empty_heap_has_no_root() {
    let mut heap = StableHeap::new(4);
    assert!(heap.is_empty());
    assert!(heap.peek_max().is_none());
    assert!(heap.extract_max().is_none());
}

#[test]
fn extracts_highest_priority_first() {
    let mut heap = StableHeap::new(8);
    for (seq, priority) in [3, 9, -2, 7, 0, 9, 1].iter().enumerate() {
        assert!(heap.insert(*priority, seq as u64, seq));
        assert!(heap.is_valid_heap());
    }

    let priorities: Vec<i32> = drain(&mut heap).iter().map(|e| e.priority).collect();
    assert_eq!(priorities, vec![9, 9, 7, 3, 1, 0, -2]);
}

#[test]
fn equal_priorities_come_out_in_arrival_order() {
    let mut heap = StableHeap::new(16);
    for seq in 0..16u64 {
        assert!(heap.insert(5, seq, seq as usize));
    }

    let sequences: Vec<u64> = drain(&mut heap).iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, (0..16).collect::<Vec<_>>());
}

#[test]
fn peek_does_not_remove() {
    let mut heap = StableHeap::new(4);
    heap.insert(1, 0, 0);
    heap.insert(4, 1, 1);

    assert_eq!(heap.peek_max().map(|e| e.slot), Some(1));
    assert_eq!(heap.len(), 2);
    assert_eq!(heap.extract_max().map(|e| e.slot), Some(1));
    assert_eq!(heap.peek_max().map(|e| e.slot), Some(0));
}

#[test]
fn insert_into_full_heap_is_refused() {
    let mut heap = StableHeap::new(2);
    assert!(heap.insert(1, 0, 0));
    assert!(heap.insert(2, 1, 1));
    assert!(heap.is_full());

    assert!(!heap.insert(100, 2, 2));
    assert_eq!(heap.len(), 2);
    assert_eq!(heap.peek_max().map(|e| e.priority), Some(2));
}

#[test]
fn clear_keeps_capacity() {
    let mut heap = StableHeap::new(3);
    heap.insert(1, 0, 0);
    heap.insert(1, 1, 1);
    heap.clear();

    assert!(heap.is_empty());
    assert_eq!(heap.capacity(), 3);
    assert!(heap.insert(1, 2, 2));
}

#[test]
fn random_workload_matches_sorted_order() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    let capacity = 257;
    let mut heap = StableHeap::new(capacity);
    let mut expected = Vec::new();
    let mut seq = 0u64;

    // interleave inserts and extractions so sift-down sees mixed shapes
    for round in 0..2000 {
        if heap.len() < capacity && (round % 3 != 2 || heap.is_empty()) {
            let priority = rng.i32(-4..=4);
            heap.insert(priority, seq, seq as usize);
            expected.push((priority, seq));
            seq += 1;
        } else {
            let got = heap.extract_max().expect("heap not empty");
            expected.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
            let want = expected.remove(0);
            assert_eq!((got.priority, got.sequence), want);
        }
        assert!(heap.is_valid_heap());
    }
}

#[test]
fn sequence_comparison_survives_wraparound() {
    assert!(sequence_before(1, 2));
    assert!(!sequence_before(2, 1));
    assert!(!sequence_before(7, 7));
    assert!(sequence_before(u64::MAX, 0));
    assert!(sequence_before(u64::MAX - 3, 2));

    let mut heap = StableHeap::new(4);
    heap.insert(0, u64::MAX - 1, 0);
    heap.insert(0, u64::MAX, 1);
    heap.insert(0, 0, 2);
    heap.insert(0, 1, 3);

    let slots: Vec<usize> = drain(&mut heap).iter().map(|e| e.slot).collect();
    assert_eq!(slots, vec![0, 1, 2, 3]);
}

#[test]
fn iter_walks_occupied_positions_only() {
    let mut heap = StableHeap::new(8);
    heap.insert(2, 0, 5);
    heap.insert(7, 1, 6);
    heap.insert(4, 2, 7);

    let mut slots: Vec<usize> = heap.iter().map(|e| e.slot).collect();
    slots.sort_unstable();
    assert_eq!(slots, vec![5, 6, 7]);
    assert_eq!(heap.iter().next().map(|e| e.priority), Some(7));

    heap.extract_max();
    assert_eq!(heap.iter().count(), 2);
}

#[test]
fn debug_shows_occupancy_and_root() {
    let mut heap = StableHeap::new(4);
    heap.insert(1, 0, 0);
    heap.insert(6, 1, 1);

    let text = format!("{:?}", heap);
    assert!(text.starts_with("StableHeap"), "{}", text);
    assert!(text.contains("len: 2"), "{}", text);
    assert!(text.contains("capacity: 4"), "{}", text);
    assert!(text.contains("priority: 6"), "{}", text);
}
