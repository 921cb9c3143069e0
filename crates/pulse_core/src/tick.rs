//! Monotonic tick source
//!
//! All animation timing is expressed in milliseconds read from a [`TickSource`].
//! The counter is a wrapping `u32`, so elapsed time is always computed with
//! wrapping subtraction.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic millisecond clock
pub trait TickSource {
    /// Milliseconds since an arbitrary fixed origin (wraps on overflow)
    fn now(&self) -> u32;

    /// Milliseconds elapsed since `mark`, a value previously returned by `now()`
    fn elapsed_since(&self, mark: u32) -> u32 {
        self.now().wrapping_sub(mark)
    }
}

/// Wall-clock tick source backed by [`Instant`]
#[derive(Clone, Copy, Debug)]
pub struct SystemTick {
    origin: Instant,
}

impl SystemTick {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTick {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SystemTick {
    fn now(&self) -> u32 {
        // Truncation is the intended wrap-around of the tick counter
        self.origin.elapsed().as_millis() as u32
    }
}

/// Manually advanced tick source
///
/// Clones share the same counter, so a test (or a host with its own notion of
/// time) can keep one handle and give another to the scheduler.
///
/// ```rust
/// use pulse_core::{ManualTick, TickSource};
///
/// let clock = ManualTick::new();
/// let shared = clock.clone();
/// clock.advance(16);
/// assert_eq!(shared.now(), 16);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualTick {
    now: Rc<Cell<u32>>,
}

impl ManualTick {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `ms` milliseconds
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    /// Jump the clock to an absolute value
    pub fn set(&self, now: u32) {
        self.now.set(now);
    }
}

impl TickSource for ManualTick {
    fn now(&self) -> u32 {
        self.now.get()
    }
}
