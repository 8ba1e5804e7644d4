//! `slavecan` library: primitives and protocol logic for a CAN-bus sensor
//! node acting as slave to a single master controller, in a `no_std`
//! environment. The crate exposes the infrastructure module (frame queues),
//! the protocol logic (identifier codec, command dispatch, feedback retry,
//! telemetry publication), and the hardware capability traits firmware must
//! implement to plug the core into a concrete CAN peripheral.
#![no_std]
//==================================================================================
/// Domain and low-level errors (queue exhaustion, identifier construction,
/// hardware transmit failures).
pub mod error;
/// Reusable storage primitives: the fixed-capacity frame queue and its
/// interrupt-safe shared wrapper.
pub mod infra;
/// Master/slave protocol implementation: wire identifiers, frame types,
/// capability traits, and the slave node state machine.
pub mod protocol;
//==================================================================================
