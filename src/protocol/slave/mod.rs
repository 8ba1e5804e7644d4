//! Slave node state machine: consumes master commands one frame per tick,
//! produces feedback frames, retries deferred transmissions, and publishes
//! periodic telemetry.
//!
//! Scheduling model: a single logical thread of control shared between the
//! receive interrupt (which calls [`accept_frame`]) and the main polling
//! loop (which calls [`SlaveNode::poll_commands`], [`SlaveNode::flush_retry`]
//! and [`SlaveNode::publish_telemetry`] once per iteration). No operation
//! blocks; every failure degrades to "frame delayed" or a silent drop, never
//! to a fatal error. Persistent mailbox exhaustion therefore cannot be
//! detected from inside the core alone.
use crate::error::TransmitError;
use crate::infra::queue::{shared::SharedQueue, FrameQueue};
use crate::protocol::transport::frame::{RxFrame, TxFrame, TxHeader};
use crate::protocol::transport::std_id::{
    Command, Feedback, SlaveId, DATA_SUB_ID, ERROR_DLC, ERROR_SUB_ID,
};
use crate::protocol::transport::traits::can_tx::CanTransmit;
use crate::protocol::transport::traits::sensor::{SensorActions, TelemetrySource};
use crate::protocol::transport::traits::tick::TickSource;

//==================================================================================Constants
/// Capacity of the transmit and receive queues.
pub const QUEUE_CAPACITY: usize = 4;

/// Receive queue shared between the interrupt and the polling loop.
pub type RxQueue<const CAP: usize> = SharedQueue<RxFrame, CAP>;

//==================================================================================SENSOR_HANDLE
#[derive(Clone, Copy, Debug)]
/// Per-sensor runtime state, created at node initialisation and mutated by
/// the command handlers.
pub struct SensorHandle {
    /// Sensor identity carried in the identifier high bits.
    pub sensor_id: u8,
    /// Telemetry period in ticks; `0` means the master never started it.
    pub freq: u16,
    /// Whether telemetry is currently active.
    pub started: bool,
    /// Tick of the last telemetry attempt for this sensor.
    last_sent: u32,
}

impl SensorHandle {
    /// Handle for a sensor that has not been started yet.
    pub const fn new(sensor_id: u8) -> Self {
        Self {
            sensor_id,
            freq: 0,
            started: false,
            last_sent: 0,
        }
    }
}

//==================================================================================RX_INTERRUPT
/// Interrupt-side entry point: queue one received frame when it targets a
/// recognised sensor. Returns `false` when the frame was discarded, either
/// because the sensor is unknown or because the queue is full.
pub fn accept_frame<const CAP: usize>(
    rx: &RxQueue<CAP>,
    recognized: &[u8],
    frame: RxFrame,
) -> bool {
    if !recognized.contains(&frame.header.id.sensor_id()) {
        return false;
    }
    rx.enqueue(frame).is_ok()
}

//==================================================================================SLAVE_NODE
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Result of one dispatcher tick.
pub enum PollOutcome {
    /// No received frame was pending.
    Idle,
    /// A recognised command was dispatched to its handler.
    Handled(Command),
    /// The frame carried an unknown sensor or sub identifier and was dropped.
    Ignored,
}

/// Slave node context owned by the caller: the transmit queue, the sensor
/// table, and a borrow of the interrupt-shared receive queue. No
/// process-wide singletons.
pub struct SlaveNode<'q, const CAP: usize, const SENSORS: usize> {
    rx: &'q RxQueue<CAP>,
    tx: FrameQueue<TxFrame, CAP>,
    sensors: [SensorHandle; SENSORS],
}

impl<'q, const CAP: usize, const SENSORS: usize> SlaveNode<'q, CAP, SENSORS> {
    /// Build the node around a (typically `static`) receive queue and the
    /// sensor handles known to this device.
    pub fn new(rx: &'q RxQueue<CAP>, sensors: [SensorHandle; SENSORS]) -> Self {
        Self {
            rx,
            tx: FrameQueue::new(),
            sensors,
        }
    }

    /// Runtime state of one sensor, if registered.
    pub fn sensor(&self, sensor_id: u8) -> Option<&SensorHandle> {
        self.sensors.iter().find(|s| s.sensor_id == sensor_id)
    }

    /// Number of frames waiting for the retry pump.
    pub fn pending_tx(&self) -> usize {
        self.tx.len()
    }

    /// Number of received frames not yet dispatched.
    pub fn pending_rx(&self) -> usize {
        self.rx.len()
    }

    //==================================================================================Dispatch
    /// Dispatcher tick: consume at most one received frame and run the
    /// matching command handler. Invoked once per main-loop iteration, not
    /// re-entrant.
    ///
    /// Handler side effects are never rolled back when the subsequent
    /// feedback transmission fails; feedback is best-effort and queued for
    /// retry instead.
    pub fn poll_commands<C, A>(&mut self, bus: &mut C, actions: &mut A) -> PollOutcome
    where
        C: CanTransmit,
        A: SensorActions,
    {
        // The frame is removed up front; processing works on the owned copy.
        let frame = match self.rx.dequeue() {
            Ok(frame) => frame,
            Err(_) => return PollOutcome::Idle,
        };

        let sensor_id = frame.header.id.sensor_id();
        let slot = match self.sensors.iter().position(|s| s.sensor_id == sensor_id) {
            Some(slot) => slot,
            None => return PollOutcome::Ignored,
        };
        let command = match Command::from_sub_id(frame.header.id.sub_id()) {
            Some(command) => command,
            None => return PollOutcome::Ignored,
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("command {} for sensor {=u8}", command, sensor_id);

        match command {
            Command::Start => {
                let freq = u16::from_le_bytes([frame.data[0], frame.data[1]]);
                actions.start(sensor_id, freq);
                self.sensors[slot].freq = freq;
                self.sensors[slot].started = true;
                // Echo the frequency back to the master.
                self.send_feedback(bus, sensor_id, Feedback::Start, &frame.data);
            }
            Command::Reset => {
                actions.reset(sensor_id);
                if self.sensors[slot].freq != 0 {
                    self.sensors[slot].started = true;
                    self.send_feedback(bus, sensor_id, Feedback::Reset, &[]);
                }
            }
            Command::Stop => {
                actions.stop(sensor_id);
                self.sensors[slot].started = false;
                // A sensor the master never started stops silently.
                if self.sensors[slot].freq != 0 {
                    self.send_feedback(bus, sensor_id, Feedback::Stop, &[]);
                }
            }
            Command::Assign => {
                actions.assign_position(sensor_id, &frame.data);
                if self.sensors[slot].freq != 0 {
                    // Echo the assigned coordinates back to the master.
                    self.send_feedback(bus, sensor_id, Feedback::Assign, &frame.data);
                }
            }
        }

        PollOutcome::Handled(command)
    }

    //==================================================================================Retry
    /// Retry pump: attempt to flush the head of the transmit queue. At most
    /// one send attempt per call; the frame is dequeued only on success, so
    /// queued frames are delivered in order. Returns whether a frame left
    /// the queue.
    pub fn flush_retry<C: CanTransmit>(&mut self, bus: &mut C) -> bool {
        let frame = match self.tx.front() {
            Ok(frame) => *frame,
            Err(_) => return false,
        };

        let sent = match bus.free_mailbox() {
            Some(mailbox) => bus.send(&frame.header, frame.payload(), mailbox).is_ok(),
            None => false,
        };
        if sent {
            let _ = self.tx.dequeue();
        }
        sent
    }

    //==================================================================================Telemetry
    /// Publish one telemetry frame for `sensor_id` when its period elapsed.
    ///
    /// Routine data is deprioritised behind command and feedback traffic:
    /// nothing is sent while either queue is non-empty. Telemetry is
    /// best-effort and never queued for retry. Returns whether a frame was
    /// handed to the hardware.
    pub fn publish_telemetry<C, S, K>(
        &mut self,
        bus: &mut C,
        source: &mut S,
        clock: &K,
        sensor_id: u8,
    ) -> bool
    where
        C: CanTransmit,
        S: TelemetrySource,
        K: TickSource,
    {
        if !self.rx.is_empty() || !self.tx.is_empty() {
            return false;
        }
        let slot = match self.sensors.iter().position(|s| s.sensor_id == sensor_id) {
            Some(slot) => slot,
            None => return false,
        };
        if self.sensors[slot].freq == 0 || !self.sensors[slot].started {
            return false;
        }

        // Wrapping subtraction keeps the comparison valid across counter
        // wraparound.
        let now = clock.now();
        if now.wrapping_sub(self.sensors[slot].last_sent) <= u32::from(self.sensors[slot].freq) {
            return false;
        }
        self.sensors[slot].last_sent = now;

        let mut buf = [0u8; 8];
        let dlc = source.telemetry(sensor_id, &mut buf).min(8);
        let id = match SlaveId::compose(sensor_id, DATA_SUB_ID) {
            Ok(id) => id,
            Err(_) => return false,
        };
        let header = TxHeader::new(id, dlc);
        match bus.free_mailbox() {
            Some(mailbox) => bus.send(&header, &buf[..dlc], mailbox).is_ok(),
            None => false,
        }
    }

    //==================================================================================Error report
    /// Report a sensor fault to the master (payload-less frame on the error
    /// sub identifier). Deferred to the retry queue on transmit failure.
    pub fn report_error<C: CanTransmit>(&mut self, bus: &mut C, sensor_id: u8) {
        let id = match SlaveId::compose(sensor_id, ERROR_SUB_ID) {
            Ok(id) => id,
            Err(_) => return,
        };
        let header = TxHeader::new(id, ERROR_DLC);
        self.transmit_or_queue(bus, TxFrame::new(header, &[]));
    }

    //==================================================================================Internals
    fn send_feedback<C: CanTransmit>(
        &mut self,
        bus: &mut C,
        sensor_id: u8,
        feedback: Feedback,
        payload: &[u8],
    ) {
        let id = match SlaveId::compose(sensor_id, feedback.sub_id()) {
            Ok(id) => id,
            // Unreachable for table sub identifiers and a recognised sensor.
            Err(_) => return,
        };
        let header = TxHeader::new(id, feedback.dlc());
        self.transmit_or_queue(bus, TxFrame::new(header, payload));
    }

    /// Attempt one immediate transmission; on failure the frame goes to the
    /// transmit queue for the retry pump. A full queue drops the frame, an
    /// accepted trade-off on this class of device.
    fn transmit_or_queue<C: CanTransmit>(&mut self, bus: &mut C, frame: TxFrame) {
        let attempt = match bus.free_mailbox() {
            Some(mailbox) => bus.send(&frame.header, frame.payload(), mailbox),
            None => Err(TransmitError::MailboxUnavailable),
        };
        if attempt.is_err() {
            #[cfg(feature = "defmt")]
            defmt::debug!("transmit deferred: id={=u16}", frame.header.id.raw());
            let _ = self.tx.enqueue(frame);
        }
    }
}
