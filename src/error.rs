//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (queue manipulation, wire
//! identifier construction, hardware transmission).
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Failures of the fixed-capacity frame queues.
pub enum QueueError {
    /// Enqueue attempted on a full queue; the frame is dropped by the caller.
    #[error("Queue is full")]
    Full,
    /// Dequeue or front/rear read attempted on an empty queue.
    #[error("Queue is empty")]
    Empty,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur while composing an 11-bit slave identifier.
pub enum WireError {
    /// The command/feedback/data sub identifier exceeds its 5-bit field.
    #[error("Sub identifier {sub_id} does not fit in 5 bits")]
    SubIdOutOfRange { sub_id: u8 },
    /// The sensor identifier does not fit the remaining identifier bits.
    #[error("Sensor identifier {sensor_id} does not fit in the standard identifier")]
    SensorIdOutOfRange { sensor_id: u8 },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Hardware-side transmission failures. Both variants are recovered locally
/// by queueing the frame for the retry pump; neither is fatal.
pub enum TransmitError {
    /// Every hardware transmit slot is currently busy.
    #[error("No transmit mailbox available")]
    MailboxUnavailable,
    /// A mailbox was nominally free but the peripheral refused the frame.
    #[error("Hardware rejected the frame")]
    Rejected,
}
