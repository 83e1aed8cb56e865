// Allocation tracking tests for the queue hot path
//
// Tests using dhat are marked with #[serial_test::serial] because dhat only
// allows one profiler to run at a time.
//
// cargo test --test allocation_tracking -- --nocapture

use rtmq::BlockingMode::NonBlocking;
use rtmq::QueueBuilder;

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[test]
#[serial_test::serial]
fn send_and_receive_into_do_not_allocate() {
    let _profiler = dhat::Profiler::builder().testing().build();

    let queue = QueueBuilder::new()
        .with_name("alloc")
        .with_depth(16)
        .with_message_size(64)
        .build()
        .unwrap();
    let payload = [0x5Au8; 48];
    let mut out = [0u8; 64];

    // first lock sets up parking_lot's per-thread state
    queue.send(&payload, 0, NonBlocking).unwrap();
    queue.receive_into(&mut out, NonBlocking).unwrap();

    let before = dhat::HeapStats::get();
    for round in 0..1000 {
        queue.send(&payload, round % 7, NonBlocking).unwrap();
        if round % 2 == 1 {
            queue.receive_into(&mut out, NonBlocking).unwrap();
            queue.receive_into(&mut out, NonBlocking).unwrap();
        }
    }
    let after = dhat::HeapStats::get();

    assert_eq!(queue.occupancy(), 0);
    assert_eq!(
        after.total_blocks, before.total_blocks,
        "send/receive_into allocated on the hot path"
    );
}

#[test]
#[serial_test::serial]
fn receive_hands_out_one_owned_buffer_per_message() {
    let _profiler = dhat::Profiler::builder().testing().build();

    let queue = QueueBuilder::new()
        .with_depth(4)
        .with_message_size(32)
        .build()
        .unwrap();
    queue.send(b"warm", 0, NonBlocking).unwrap();
    queue.receive(NonBlocking).unwrap();

    let before = dhat::HeapStats::get();
    let mut kept = Vec::with_capacity(100);
    for round in 0..100 {
        queue.send(b"payload", round, NonBlocking).unwrap();
        kept.push(queue.receive(NonBlocking).unwrap().1);
    }
    let after = dhat::HeapStats::get();

    // one block for `kept` plus one copy-out buffer per receive
    assert_eq!(after.total_blocks - before.total_blocks, 101);
    assert!(kept.iter().all(|p| p == b"payload"));
}
