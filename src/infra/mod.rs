//! Infrastructure primitives shared by the protocol modules.
pub mod queue;
