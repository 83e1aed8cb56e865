use rtmq::Core::{queue_count, queue_names};
use rtmq::{MessageQueue, QueueBuilder};
use serial_test::serial;

#[test]
#[serial]
fn created_queues_are_registered_until_dropped() {
    let baseline = queue_count();

    let a = QueueBuilder::new().with_name("cmdDisp").build().unwrap();
    let b = QueueBuilder::new().with_name("tlmChan").build().unwrap();
    assert_eq!(queue_count(), baseline + 2);

    let names = queue_names();
    assert!(names.iter().any(|n| n == "cmdDisp"));
    assert!(names.iter().any(|n| n == "tlmChan"));
    assert_ne!(a.id(), b.id());

    drop(a);
    assert_eq!(queue_count(), baseline + 1);
    assert!(!queue_names().iter().any(|n| n == "cmdDisp"));

    drop(b);
    assert_eq!(queue_count(), baseline);
}

#[test]
#[serial]
fn uncreated_and_rejected_queues_are_not_registered() {
    let baseline = queue_count();

    let _uncreated = MessageQueue::new();
    assert!(QueueBuilder::new().with_depth(0).build().is_err());

    assert_eq!(queue_count(), baseline);
}
