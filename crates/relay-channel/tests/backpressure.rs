//! Blocking semantics across both capacity dimensions.

mod common;

use std::{sync::mpsc, thread, time::Duration};

use common::TestRecord;
use relay_channel::{Channel, Record};

const BLOCKED: Duration = Duration::from_millis(150);
const COMPLETES: Duration = Duration::from_secs(5);

/// capacity=2: two pushes succeed without blocking, a third blocks until a
/// pull frees a slot.
#[test]
fn test_push_blocks_at_item_capacity() {
    let ch = common::channel(2, 1000, 4);
    ch.push(TestRecord::sized(1, 100)).unwrap();
    ch.push(TestRecord::sized(2, 100)).unwrap();
    assert_eq!(ch.len(), 2);

    let (done_tx, done_rx) = mpsc::channel();
    let producer = {
        let ch = ch.clone();
        thread::spawn(move || {
            ch.push(TestRecord::sized(3, 100)).unwrap();
            done_tx.send(()).unwrap();
        })
    };

    assert!(
        done_rx.recv_timeout(BLOCKED).is_err(),
        "third push must block at capacity"
    );

    let first = ch.pull().unwrap().into_data().unwrap();
    assert_eq!(first.id, 1);

    done_rx
        .recv_timeout(COMPLETES)
        .expect("push must complete once a slot is free");
    producer.join().unwrap();
    assert_eq!(ch.len(), 2);
}

/// byte_capacity=150 with 100 bytes already queued: a 100-byte batch blocks
/// until a pull frees bytes, then both records are admitted atomically.
#[test]
fn test_push_all_blocks_on_byte_capacity() {
    let ch = common::channel(8, 150, 4);
    ch.push(TestRecord::sized(1, 100)).unwrap();

    let (done_tx, done_rx) = mpsc::channel();
    let producer = {
        let ch = ch.clone();
        thread::spawn(move || {
            let mut batch = vec![TestRecord::sized(2, 50), TestRecord::sized(3, 50)];
            ch.push_all(&mut batch).unwrap();
            assert!(batch.is_empty());
            done_tx.send(()).unwrap();
        })
    };

    assert!(
        done_rx.recv_timeout(BLOCKED).is_err(),
        "batch must block while bytes are insufficient"
    );
    // Mid-admission nothing is visible: only the prior record is queued.
    assert_eq!(ch.len(), 1);

    let first = ch.pull().unwrap().into_data().unwrap();
    assert_eq!(first.id, 1);

    done_rx
        .recv_timeout(COMPLETES)
        .expect("batch must be admitted once bytes are free");
    producer.join().unwrap();

    assert_eq!(ch.len(), 2);
    assert!(ch.occupied_bytes() <= 150);
}

/// Batch admission also waits on the slot dimension.
#[test]
fn test_push_all_blocks_on_slot_capacity() {
    let ch = common::channel(2, 10_000, 4);
    ch.push(TestRecord::sized(1, 1)).unwrap();

    let (done_tx, done_rx) = mpsc::channel();
    let producer = {
        let ch = ch.clone();
        thread::spawn(move || {
            let mut batch = vec![TestRecord::sized(2, 1), TestRecord::sized(3, 1)];
            ch.push_all(&mut batch).unwrap();
            done_tx.send(()).unwrap();
        })
    };

    assert!(
        done_rx.recv_timeout(BLOCKED).is_err(),
        "batch of two must not fit a single free slot"
    );

    let _ = ch.pull().unwrap();
    done_rx
        .recv_timeout(COMPLETES)
        .expect("batch must be admitted once slots are free");
    producer.join().unwrap();
    assert_eq!(ch.len(), 2);
}

/// Queue length never exceeds `capacity` while producers outrun the consumer.
#[test]
fn test_queue_length_stays_bounded() {
    let capacity = 4;
    let ch = common::channel(capacity, 1_000_000, 2);

    let producer = {
        let ch = ch.clone();
        thread::spawn(move || {
            for id in 0..200 {
                ch.push(TestRecord::sized(id, 10)).unwrap();
            }
        })
    };

    let mut seen = 0;
    while seen < 200 {
        assert!(ch.len() <= capacity, "queue length exceeded capacity");
        if let Some(record) = ch.pull().unwrap().into_data() {
            assert!(record.byte_size() == 10);
            seen += 1;
        }
    }
    producer.join().unwrap();
    assert!(ch.is_empty());
    assert_eq!(ch.occupied_bytes(), 0);
}
