/// Test doubles simulating the CAN transmit hardware, the tick counter, and
/// the sensor collaborators during integration tests.
use slavecan::error::TransmitError;
use slavecan::protocol::transport::frame::TxHeader;
use slavecan::protocol::transport::traits::can_tx::{CanTransmit, Mailbox};
use slavecan::protocol::transport::traits::sensor::{SensorActions, TelemetrySource};
use slavecan::protocol::transport::traits::tick::TickSource;

/// One frame as it was handed to the mock hardware.
#[derive(Clone, Debug)]
pub struct SentFrame {
    pub header: TxHeader,
    pub payload: Vec<u8>,
    pub mailbox: Mailbox,
}

/// Scripted transmit backend: mailbox availability and the send verdict are
/// set by the test, every accepted frame is recorded in order.
pub struct MockCan {
    free: [bool; 3],
    accept: bool,
    pub sent: Vec<SentFrame>,
    pub rejects: usize,
}

#[allow(dead_code)]
impl MockCan {
    /// Backend with all mailboxes free and a hardware that accepts frames.
    pub fn accepting() -> Self {
        Self {
            free: [true; 3],
            accept: true,
            sent: Vec::new(),
            rejects: 0,
        }
    }

    /// Backend whose mailboxes are all busy.
    pub fn exhausted() -> Self {
        let mut bus = Self::accepting();
        bus.free = [false; 3];
        bus
    }

    /// Backend with free mailboxes that rejects every send.
    pub fn rejecting() -> Self {
        let mut bus = Self::accepting();
        bus.accept = false;
        bus
    }

    pub fn set_free(&mut self, free: [bool; 3]) {
        self.free = free;
    }

    pub fn set_accept(&mut self, accept: bool) {
        self.accept = accept;
    }
}

impl CanTransmit for MockCan {
    fn mailbox_free(&self, mailbox: Mailbox) -> bool {
        match mailbox {
            Mailbox::M0 => self.free[0],
            Mailbox::M1 => self.free[1],
            Mailbox::M2 => self.free[2],
        }
    }

    fn send(
        &mut self,
        header: &TxHeader,
        payload: &[u8],
        mailbox: Mailbox,
    ) -> Result<(), TransmitError> {
        if !self.accept {
            self.rejects += 1;
            return Err(TransmitError::Rejected);
        }
        self.sent.push(SentFrame {
            header: *header,
            payload: payload.to_vec(),
            mailbox,
        });
        Ok(())
    }
}

/// Manually advanced tick counter.
#[derive(Default)]
#[allow(dead_code)]
pub struct ManualTick {
    now: u32,
}

#[allow(dead_code)]
impl ManualTick {
    pub fn at(now: u32) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: u32) {
        self.now = now;
    }
}

impl TickSource for ManualTick {
    fn now(&self) -> u32 {
        self.now
    }
}

/// Record of one collaborator invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionCall {
    Start(u8, u16),
    Reset(u8),
    Stop(u8),
    Assign(u8, [u8; 8]),
}

/// Collaborator recording every handler invocation in order.
#[derive(Default)]
pub struct RecordingActions {
    pub calls: Vec<ActionCall>,
}

impl SensorActions for RecordingActions {
    fn start(&mut self, sensor_id: u8, freq: u16) {
        self.calls.push(ActionCall::Start(sensor_id, freq));
    }

    fn reset(&mut self, sensor_id: u8) {
        self.calls.push(ActionCall::Reset(sensor_id));
    }

    fn stop(&mut self, sensor_id: u8) {
        self.calls.push(ActionCall::Stop(sensor_id));
    }

    fn assign_position(&mut self, sensor_id: u8, payload: &[u8; 8]) {
        self.calls.push(ActionCall::Assign(sensor_id, *payload));
    }
}

/// Telemetry source producing a fixed byte pattern with a fixed DLC.
#[allow(dead_code)]
pub struct PatternTelemetry {
    pub dlc: usize,
    pub byte: u8,
}

impl TelemetrySource for PatternTelemetry {
    fn telemetry(&mut self, _sensor_id: u8, buf: &mut [u8; 8]) -> usize {
        buf[..self.dlc].fill(self.byte);
        self.dlc
    }
}
