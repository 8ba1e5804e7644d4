//! Wire-level transport: identifier layout, frame types, and the traits a
//! firmware implements to connect the core to its CAN peripheral and clock.
pub mod frame;
pub mod std_id;
pub mod traits;
