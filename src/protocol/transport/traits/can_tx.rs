//! Minimal abstraction over the CAN transmit hardware. The core never
//! inspects peripheral registers itself; it asks the implementation which
//! mailbox is free and hands frames over for transmission. Every method is
//! synchronous and non-blocking so it can be called from a polled main loop.
use crate::error::TransmitError;
use crate::protocol::transport::frame::TxHeader;

//==================================================================================MAILBOX
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// One hardware transmit slot. bxCAN-class peripherals expose three.
pub enum Mailbox {
    M0,
    M1,
    M2,
}

/// Fixed scan priority: lower-numbered mailboxes are tried first.
pub const MAILBOX_SCAN_ORDER: [Mailbox; 3] = [Mailbox::M0, Mailbox::M1, Mailbox::M2];

//==================================================================================CAN_TRANSMIT
/// Contract to hand frames to the CAN peripheral.
pub trait CanTransmit {
    /// Whether the given transmit slot is currently free. A pure query over
    /// hardware state; no side effects.
    fn mailbox_free(&self, mailbox: Mailbox) -> bool;

    /// Load one frame into `mailbox` and request transmission. Must not
    /// block; a busy or faulted peripheral reports [`TransmitError`].
    fn send(
        &mut self,
        header: &TxHeader,
        payload: &[u8],
        mailbox: Mailbox,
    ) -> Result<(), TransmitError>;

    /// First free transmit slot in [`MAILBOX_SCAN_ORDER`], or `None` when
    /// all are busy.
    fn free_mailbox(&self) -> Option<Mailbox> {
        MAILBOX_SCAN_ORDER
            .into_iter()
            .find(|mailbox| self.mailbox_free(*mailbox))
    }
}
