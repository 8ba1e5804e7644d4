//! Interrupt-safe wrapper around [`FrameQueue`].
//!
//! The receive queue is written from the CAN receive interrupt and drained
//! from the main polling loop. A torn read of `front`/`rear`/`used` across
//! those two contexts would corrupt the ring, so every queue operation runs
//! inside a short critical section ([`embassy_sync`] blocking mutex over a
//! [`CriticalSectionRawMutex`]). The transmit queue is touched by the loop
//! context only and does not need this wrapper.
use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

use crate::error::QueueError;
use crate::infra::queue::FrameQueue;

/// A [`FrameQueue`] that may be shared between interrupt and loop context.
///
/// `new()` is `const`, so firmware can place the queue in a `static` and
/// hand the interrupt handler a `&'static` reference.
pub struct SharedQueue<T: Copy, const CAP: usize> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<FrameQueue<T, CAP>>>,
}

impl<T: Copy, const CAP: usize> SharedQueue<T, CAP> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(FrameQueue::new())),
        }
    }

    /// Append one item at the rear, inside a critical section.
    pub fn enqueue(&self, item: T) -> Result<(), QueueError> {
        self.inner.lock(|queue| queue.borrow_mut().enqueue(item))
    }

    /// Remove and return the front item, inside a critical section.
    pub fn dequeue(&self) -> Result<T, QueueError> {
        self.inner.lock(|queue| queue.borrow_mut().dequeue())
    }

    /// Copy of the front item without removing it.
    pub fn front(&self) -> Result<T, QueueError> {
        self.inner.lock(|queue| queue.borrow().front().copied())
    }

    pub fn len(&self) -> usize {
        self.inner.lock(|queue| queue.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock(|queue| queue.borrow().is_empty())
    }

    pub fn is_full(&self) -> bool {
        self.inner.lock(|queue| queue.borrow().is_full())
    }
}

impl<T: Copy, const CAP: usize> Default for SharedQueue<T, CAP> {
    fn default() -> Self {
        Self::new()
    }
}
