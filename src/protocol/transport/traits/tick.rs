//! Monotonic tick abstraction used to pace telemetry publication.

/// Source of a monotonically increasing tick counter (typically the 1 ms
/// systick). The counter is allowed to wrap: elapsed time must always be
/// computed with `now().wrapping_sub(earlier)`.
pub trait TickSource {
    /// Current counter value.
    fn now(&self) -> u32;
}
