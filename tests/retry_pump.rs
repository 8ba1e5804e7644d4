//! Integration scenarios for the retry pump: one attempt per call, strict
//! ordering, and no progress while the hardware stays unavailable.
mod helpers;

use helpers::{MockCan, RecordingActions};
use slavecan::protocol::slave::{
    accept_frame, RxQueue, SensorHandle, SlaveNode, QUEUE_CAPACITY,
};
use slavecan::protocol::transport::frame::{RxFrame, RxHeader};
use slavecan::protocol::transport::std_id::{
    SlaveId, ENCODER_SENSOR, IMU_SENSOR, RECOGNIZED_SENSORS,
};

/// Queue `count` start-feedback frames by dispatching against a saturated
/// bus, with the round index echoed in the payload for order checks.
fn node_with_backlog(
    rx: &RxQueue<QUEUE_CAPACITY>,
    count: usize,
) -> SlaveNode<'_, QUEUE_CAPACITY, 1> {
    let mut node = SlaveNode::new(rx, [SensorHandle::new(IMU_SENSOR)]);
    let mut busy = MockCan::exhausted();
    let mut actions = RecordingActions::default();

    for round in 0..count as u8 {
        let id = SlaveId::compose(IMU_SENSOR, 0x00).unwrap();
        let mut data = [0u8; 8];
        data[0] = round;
        let frame = RxFrame::new(RxHeader::new(id, 2, 0), data);
        assert!(accept_frame(rx, &RECOGNIZED_SENSORS, frame));
        node.poll_commands(&mut busy, &mut actions);
    }
    assert_eq!(node.pending_tx(), count);
    node
}

#[test]
/// An empty transmit queue makes the pump a no-op.
fn empty_queue_is_a_noop() {
    let rx: RxQueue<QUEUE_CAPACITY> = RxQueue::new();
    let mut node = SlaveNode::new(&rx, [SensorHandle::new(IMU_SENSOR)]);
    let mut bus = MockCan::accepting();

    assert!(!node.flush_retry(&mut bus));
    assert!(bus.sent.is_empty());
}

#[test]
/// A cooperating backend drains exactly one frame per call, oldest first.
fn drains_one_frame_per_call_in_order() {
    let rx = RxQueue::new();
    let mut node = node_with_backlog(&rx, 3);
    let mut bus = MockCan::accepting();

    for expected_len in 1..=3 {
        assert!(node.flush_retry(&mut bus));
        assert_eq!(bus.sent.len(), expected_len);
    }
    assert!(!node.flush_retry(&mut bus));

    let order: Vec<u8> = bus.sent.iter().map(|frame| frame.payload[0]).collect();
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
/// While no mailbox is free the queue length never changes.
fn exhausted_mailboxes_leave_queue_unchanged() {
    let rx = RxQueue::new();
    let mut node = node_with_backlog(&rx, 2);
    let mut bus = MockCan::exhausted();

    for _ in 0..10 {
        assert!(!node.flush_retry(&mut bus));
    }
    assert_eq!(node.pending_tx(), 2);
    assert!(bus.sent.is_empty());
}

#[test]
/// A rejecting peripheral keeps the frame at the front for the next call.
fn rejected_send_keeps_frame_at_front() {
    let rx = RxQueue::new();
    let mut node = node_with_backlog(&rx, 2);
    let mut bus = MockCan::rejecting();

    for _ in 0..5 {
        assert!(!node.flush_retry(&mut bus));
    }
    assert_eq!(node.pending_tx(), 2);
    assert_eq!(bus.rejects, 5);

    // The moment the hardware recovers, delivery resumes in order.
    bus.set_accept(true);
    assert!(node.flush_retry(&mut bus));
    assert_eq!(bus.sent[0].payload[0], 0);
    assert_eq!(node.pending_tx(), 1);
}

#[test]
/// Frames queued for two different sensors keep their relative order.
fn preserves_order_across_sensors() {
    let rx: RxQueue<QUEUE_CAPACITY> = RxQueue::new();
    let mut node = SlaveNode::new(
        &rx,
        [
            SensorHandle::new(IMU_SENSOR),
            SensorHandle::new(ENCODER_SENSOR),
        ],
    );
    let mut busy = MockCan::exhausted();

    node.report_error(&mut busy, IMU_SENSOR);
    node.report_error(&mut busy, ENCODER_SENSOR);
    assert_eq!(node.pending_tx(), 2);

    let mut bus = MockCan::accepting();
    assert!(node.flush_retry(&mut bus));
    assert!(node.flush_retry(&mut bus));
    let sensors: Vec<u8> = bus
        .sent
        .iter()
        .map(|frame| frame.header.id.sensor_id())
        .collect();
    assert_eq!(sensors, vec![IMU_SENSOR, ENCODER_SENSOR]);
}
