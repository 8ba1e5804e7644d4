//! Fixed-capacity circular FIFO for CAN frames.
//!
//! One transmit queue and one receive queue exist per node instance. Both
//! live for the whole operating lifetime of the node, so the storage is a
//! const-initialised array rather than a heap allocation: `new()` is `const`
//! and the queue can sit in a `static`.
use crate::error::QueueError;

pub mod shared;

//==================================================================================FRAME_QUEUE
/// Circular buffer with `front`/`rear`/`used` bookkeeping.
///
/// Invariants: `0 <= used <= CAP`; `front` and `rear` are valid indices
/// modulo `CAP` once any item has been enqueued; `used == 0` means empty and
/// `used == CAP` means full. Ordering is strict FIFO, no priority and no
/// deduplication.
///
/// `dequeue` returns the removed element directly instead of requiring a
/// `front()` read first, and `front()`/`rear()` on an empty queue are
/// explicit errors rather than caller-responsibility contracts.
#[derive(Debug, Clone, Copy)]
pub struct FrameQueue<T: Copy, const CAP: usize> {
    front: usize,
    rear: usize,
    used: usize,
    slots: [Option<T>; CAP],
}

impl<T: Copy, const CAP: usize> FrameQueue<T, CAP> {
    /// Create an empty queue. `CAP` must be non-zero.
    pub const fn new() -> Self {
        assert!(CAP > 0, "queue capacity must be non-zero");
        Self {
            front: 0,
            rear: CAP - 1,
            used: 0,
            slots: [None; CAP],
        }
    }

    /// Number of items currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.used
    }

    /// Fixed capacity chosen at the type level.
    #[inline]
    pub fn capacity(&self) -> usize {
        CAP
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.used == CAP
    }

    /// Append one item at the rear. A full queue fails without mutating any
    /// index; the caller decides whether the loss matters.
    pub fn enqueue(&mut self, item: T) -> Result<(), QueueError> {
        if self.is_full() {
            return Err(QueueError::Full);
        }
        self.rear = (self.rear + 1) % CAP;
        self.slots[self.rear] = Some(item);
        self.used += 1;
        Ok(())
    }

    /// Remove and return the item at the front.
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        let item = self.slots[self.front].take().ok_or(QueueError::Empty)?;
        self.front = (self.front + 1) % CAP;
        self.used -= 1;
        Ok(item)
    }

    /// Read the oldest item without removing it.
    pub fn front(&self) -> Result<&T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        self.slots[self.front].as_ref().ok_or(QueueError::Empty)
    }

    /// Read the most recently enqueued item without removing it.
    pub fn rear(&self) -> Result<&T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        self.slots[self.rear].as_ref().ok_or(QueueError::Empty)
    }
}

impl<T: Copy, const CAP: usize> Default for FrameQueue<T, CAP> {
    fn default() -> Self {
        Self::new()
    }
}
