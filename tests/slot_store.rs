use rtmq::MsgQueue::Buffer::SlotStore;
use rtmq::QueueError;

#[test]
fn hands_out_every_slot_once() {
    let mut store = SlotStore::new(4, 8);
    let mut slots: Vec<usize> = (0..4).map(|_| store.acquire_free_slot().unwrap()).collect();
    slots.sort_unstable();

    assert_eq!(slots, vec![0, 1, 2, 3]);
    assert_eq!(store.free_count(), 0);
    assert!(store.acquire_free_slot().is_none());
}

#[test]
fn released_slot_is_reused() {
    let mut store = SlotStore::new(2, 8);
    let a = store.acquire_free_slot().unwrap();
    let _b = store.acquire_free_slot().unwrap();

    store.release(a);
    assert_eq!(store.free_count(), 1);
    assert_eq!(store.acquire_free_slot(), Some(a));
}

#[test]
fn payload_is_copied_byte_exact() {
    let mut store = SlotStore::new(2, 16);
    let slot = store.acquire_free_slot().unwrap();
    let payload: Vec<u8> = (0..16).collect();

    store.write(slot, &payload).unwrap();
    assert_eq!(store.payload(slot), &payload[..]);
    assert_eq!(store.read(slot), payload);

    let mut out = [0xAAu8; 20];
    assert_eq!(store.read_into(slot, &mut out).unwrap(), 16);
    assert_eq!(&out[..16], &payload[..]);
    assert_eq!(out[16], 0xAA);
}

#[test]
fn shorter_payload_overwrites_only_its_length() {
    let mut store = SlotStore::new(1, 8);
    let slot = store.acquire_free_slot().unwrap();
    store.write(slot, b"abcdefgh").unwrap();
    store.write(slot, b"xy").unwrap();

    assert_eq!(store.payload(slot), b"xy");
}

#[test]
fn oversized_payload_is_rejected() {
    let mut store = SlotStore::new(1, 4);
    let slot = store.acquire_free_slot().unwrap();

    assert_eq!(
        store.write(slot, b"12345"),
        Err(QueueError::SizeError { len: 5, max: 4 })
    );
}

#[test]
fn read_into_small_buffer_fails() {
    let mut store = SlotStore::new(1, 8);
    let slot = store.acquire_free_slot().unwrap();
    store.write(slot, b"abcdef").unwrap();

    let mut out = [0u8; 3];
    assert_eq!(
        store.read_into(slot, &mut out),
        Err(QueueError::BufferTooSmall { len: 6, capacity: 3 })
    );
}

#[test]
#[should_panic(expected = "not in use")]
fn double_release_panics() {
    let mut store = SlotStore::new(2, 8);
    let slot = store.acquire_free_slot().unwrap();
    store.release(slot);
    store.release(slot);
}

#[test]
fn debug_shows_slot_accounting() {
    let mut store = SlotStore::new(4, 32);
    store.acquire_free_slot().unwrap();

    let text = format!("{:?}", store);
    assert!(text.starts_with("SlotStore"), "{}", text);
    assert!(text.contains("slot_count: 4"), "{}", text);
    assert!(text.contains("slot_size: 32"), "{}", text);
    assert!(text.contains("free: 3"), "{}", text);
}
