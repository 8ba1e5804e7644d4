//! Master/slave protocol implementation.
//!
//! `transport` holds the wire-level pieces (identifiers, frames, hardware
//! capability traits); `slave` holds the node state machine that consumes
//! master commands and produces feedback, telemetry, and error reports.
pub mod slave;
pub mod transport;
