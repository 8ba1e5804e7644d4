//! Composition and extraction of the 11-bit standard CAN identifiers used by
//! the master/slave protocol, plus the static command/feedback/data tables.
//!
//! Identifier layout: bits `[10:5]` carry the sensor identity, bits `[4:0]`
//! carry the command, feedback, or data-channel sub identifier.
use embedded_can::StandardId;

use crate::error::WireError;

//==================================================================================Constants
/// Width of the sub-identifier field in the standard identifier.
pub const SUB_ID_BITS: u16 = 5;
/// Mask selecting the sub-identifier bits.
pub const SUB_ID_MASK: u16 = 0x1F;
/// Largest sensor identity representable in the remaining identifier bits.
pub const MAX_SENSOR_ID: u8 = 0x3F;

/// Reserved sensor identities.
pub const IMU_SENSOR: u8 = 0x00;
pub const ENCODER_SENSOR: u8 = 0x01;
/// Sensor identities the slave queues frames for; everything else is
/// discarded at the receive interrupt.
pub const RECOGNIZED_SENSORS: [u8; 2] = [IMU_SENSOR, ENCODER_SENSOR];

/// Sub identifier of the periodic telemetry channel.
pub const DATA_SUB_ID: u8 = 0x0A;
/// Sub identifier of the error report, payload-less.
pub const ERROR_SUB_ID: u8 = 0x0B;
pub const ERROR_DLC: usize = 0;

//==================================================================================SLAVE_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Encapsulates an 11-bit standard identifier and exposes accessors for the
/// sensor identity and the sub identifier.
pub struct SlaveId(StandardId);

impl SlaveId {
    /// Compose `(sensor_id << 5) | sub_id`, rejecting values that do not fit
    /// their fields.
    pub fn compose(sensor_id: u8, sub_id: u8) -> Result<Self, WireError> {
        if u16::from(sub_id) > SUB_ID_MASK {
            return Err(WireError::SubIdOutOfRange { sub_id });
        }
        if sensor_id > MAX_SENSOR_ID {
            return Err(WireError::SensorIdOutOfRange { sensor_id });
        }
        let raw = (u16::from(sensor_id) << SUB_ID_BITS) | u16::from(sub_id);
        StandardId::new(raw)
            .map(Self)
            .ok_or(WireError::SensorIdOutOfRange { sensor_id })
    }

    /// Wrap an identifier already validated by the CAN peripheral.
    pub fn from_standard(id: StandardId) -> Self {
        Self(id)
    }

    /// Sensor identity stored in the high bits.
    pub fn sensor_id(&self) -> u8 {
        (self.0.as_raw() >> SUB_ID_BITS) as u8
    }

    /// Command/feedback/data sub identifier stored in the low 5 bits.
    pub fn sub_id(&self) -> u8 {
        (self.0.as_raw() & SUB_ID_MASK) as u8
    }

    /// Underlying standard identifier, for handoff to the peripheral driver.
    pub fn as_standard(&self) -> StandardId {
        self.0
    }

    /// Raw 11-bit value.
    pub fn raw(&self) -> u16 {
        self.0.as_raw()
    }
}

//==================================================================================COMMANDS
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Commands the master may address to a sensor. The discriminant order is
/// also the dispatcher's fixed evaluation order.
pub enum Command {
    /// Begin telemetry at the frequency carried in the payload.
    Start,
    /// Reset the sensor's data source.
    Reset,
    /// Stop telemetry; the data source keeps running.
    Stop,
    /// Assign a new position to the encoder, payload uninterpreted here.
    Assign,
}

impl Command {
    /// Resolve a received sub identifier; unknown values are ignored frames,
    /// not errors.
    pub fn from_sub_id(sub_id: u8) -> Option<Self> {
        match sub_id {
            0x00 => Some(Self::Start),
            0x01 => Some(Self::Reset),
            0x02 => Some(Self::Stop),
            0x03 => Some(Self::Assign),
            _ => None,
        }
    }

    pub const fn sub_id(self) -> u8 {
        match self {
            Self::Start => 0x00,
            Self::Reset => 0x01,
            Self::Stop => 0x02,
            Self::Assign => 0x03,
        }
    }

    /// Expected payload length of the command frame.
    pub const fn dlc(self) -> usize {
        match self {
            Self::Start => 2,
            Self::Reset => 0,
            Self::Stop => 0,
            Self::Assign => 8,
        }
    }
}

//==================================================================================FEEDBACK
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Feedback kinds the slave reports back to the master. Each mirrors the
/// command that triggered it and reuses its sub identifier.
pub enum Feedback {
    /// Echoes the configured frequency back (2 bytes).
    Start,
    /// Payload-less completion notice.
    Reset,
    /// Payload-less completion notice.
    Stop,
    /// Echoes the assigned coordinates back (8 bytes).
    Assign,
}

impl Feedback {
    pub const fn sub_id(self) -> u8 {
        match self {
            Self::Start => 0x00,
            Self::Reset => 0x01,
            Self::Stop => 0x02,
            Self::Assign => 0x03,
        }
    }

    /// Payload length used to initialise the outgoing header.
    pub const fn dlc(self) -> usize {
        match self {
            Self::Start => 2,
            Self::Reset => 0,
            Self::Stop => 0,
            Self::Assign => 8,
        }
    }
}
