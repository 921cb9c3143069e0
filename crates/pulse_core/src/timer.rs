//! Periodic timer registration
//!
//! A [`Timer`] is the handle a subsystem receives when it registers a recurring
//! callback with the host loop. The host asks the timer whether it is due and,
//! if so, runs the subsystem. The subsystem can pause its own timer while it
//! has nothing to do, so an idle subsystem costs nothing per frame.
//!
//! Clones share state: the owner pauses and releases, the host polls.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug)]
struct TimerState {
    period_ms: Cell<u32>,
    last_run: Cell<u32>,
    paused: Cell<bool>,
    released: Cell<bool>,
}

/// Shared handle to a pausable periodic timer
#[derive(Clone, Debug)]
pub struct Timer {
    state: Rc<TimerState>,
}

impl Timer {
    /// Register a timer firing every `period_ms`, measured from `now`
    pub fn new(period_ms: u32, now: u32) -> Self {
        Self {
            state: Rc::new(TimerState {
                period_ms: Cell::new(period_ms),
                last_run: Cell::new(now),
                paused: Cell::new(false),
                released: Cell::new(false),
            }),
        }
    }

    pub fn period(&self) -> u32 {
        self.state.period_ms.get()
    }

    pub fn set_period(&self, period_ms: u32) {
        self.state.period_ms.set(period_ms);
    }

    /// Pause or resume the timer
    pub fn pause(&self, paused: bool) {
        if self.state.paused.replace(paused) != paused {
            tracing::debug!("Timer: {}", if paused { "paused" } else { "resumed" });
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused.get()
    }

    /// Drop the registration; a released timer never fires again
    pub fn release(&self) {
        if !self.state.released.replace(true) {
            tracing::debug!("Timer: released");
        }
    }

    pub fn is_released(&self) -> bool {
        self.state.released.get()
    }

    /// Check whether the timer should fire at `now`, re-arming it if so
    pub fn fire_if_due(&self, now: u32) -> bool {
        if self.is_paused() || self.is_released() {
            return false;
        }

        let elapsed = now.wrapping_sub(self.state.last_run.get());
        if elapsed >= self.period() {
            self.state.last_run.set(now);
            true
        } else {
            false
        }
    }

    /// Milliseconds until the next firing, or `None` if the timer can't fire
    pub fn time_until_due(&self, now: u32) -> Option<u32> {
        if self.is_paused() || self.is_released() {
            return None;
        }
        let elapsed = now.wrapping_sub(self.state.last_run.get());
        Some(self.period().saturating_sub(elapsed))
    }
}
