//! Contracts for the sensor collaborators (encoder, IMU, ...). The slave
//! core only moves their payload bytes; the numeric processing lives behind
//! these traits in firmware.

/// One method per master command kind, supplied to the dispatcher at each
/// poll. Implementations perform the hardware action (start a timer, reset
/// an integration state, write a position) and must tolerate being invoked
/// again for an already-started sensor.
pub trait SensorActions {
    /// Start the sensor's data source at the requested telemetry period.
    fn start(&mut self, sensor_id: u8, freq: u16);

    /// Reset the sensor's data source. Runs even when the sensor was never
    /// started; only the feedback is suppressed in that case.
    fn reset(&mut self, sensor_id: u8);

    /// Stop telemetry for the sensor.
    fn stop(&mut self, sensor_id: u8);

    /// Hand the raw 8-byte coordinate payload to the position collaborator.
    /// The core does not interpret the bytes.
    fn assign_position(&mut self, sensor_id: u8, payload: &[u8; 8]);
}

/// Produces telemetry payload bytes on demand.
pub trait TelemetrySource {
    /// Write up to eight payload bytes into `buf` and return the DLC
    /// (6 or 8 depending on the sensor).
    fn telemetry(&mut self, sensor_id: u8, buf: &mut [u8; 8]) -> usize;
}
