//! In-memory representation of the transmit and receive CAN frames moved by
//! the slave core. Classic CAN: up to eight payload bytes per frame.
use crate::protocol::transport::std_id::SlaveId;

//==================================================================================HEADERS
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Header of an outgoing frame.
pub struct TxHeader {
    /// 11-bit standard identifier (sensor id + sub id).
    pub id: SlaveId,
    /// Number of valid payload bytes, 0 to 8, taken from the protocol table.
    pub dlc: usize,
    /// Capture the transmit timestamp in the last two payload bytes.
    /// Kept disabled by the core; the payload bytes belong to the protocol.
    pub transmit_global_time: bool,
}

impl TxHeader {
    /// Header for a standard data frame with the global-time flag cleared.
    pub fn new(id: SlaveId, dlc: usize) -> Self {
        Self {
            id,
            dlc,
            transmit_global_time: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Header of a received frame as reported by the peripheral.
pub struct RxHeader {
    /// 11-bit standard identifier (sensor id + sub id).
    pub id: SlaveId,
    /// Number of valid payload bytes, 0 to 8.
    pub dlc: usize,
    /// Receive timestamp counted by the peripheral.
    pub timestamp: u16,
}

impl RxHeader {
    pub fn new(id: SlaveId, dlc: usize, timestamp: u16) -> Self {
        Self { id, dlc, timestamp }
    }
}

//==================================================================================FRAMES
#[derive(Clone, Copy, Debug)]
/// One outgoing frame: header plus payload storage.
pub struct TxFrame {
    pub header: TxHeader,
    pub data: [u8; 8],
}

impl TxFrame {
    /// Build a frame by copying `payload` into the fixed storage. Bytes
    /// beyond the header DLC are kept zeroed.
    pub fn new(header: TxHeader, payload: &[u8]) -> Self {
        let mut data = [0u8; 8];
        let len = payload.len().min(8);
        data[..len].copy_from_slice(&payload[..len]);
        Self { header, data }
    }

    /// View over the valid payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.header.dlc.min(8)]
    }
}

#[derive(Clone, Copy, Debug)]
/// One received frame: header plus payload storage.
pub struct RxFrame {
    pub header: RxHeader,
    pub data: [u8; 8],
}

impl RxFrame {
    pub fn new(header: RxHeader, data: [u8; 8]) -> Self {
        Self { header, data }
    }

    /// View over the valid payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.header.dlc.min(8)]
    }
}
