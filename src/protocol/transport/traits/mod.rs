//! Capability traits implemented by firmware: CAN transmission, the tick
//! counter, and the sensor collaborators driven by master commands.
pub mod can_tx;
pub mod sensor;
pub mod tick;
