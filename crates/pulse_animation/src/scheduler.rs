//! Animation scheduler
//!
//! Owns every running animation and advances them each time its timer fires.
//!
//! Callbacks run synchronously inside [`AnimationScheduler::tick`] and receive
//! the scheduler itself, so they may start or cancel animations (including
//! their own). The tick loop stays correct under such re-entrant changes:
//!
//! - Every record carries the parity of the round it was last advanced in.
//!   A record whose parity already matches the current round is skipped, so
//!   nothing is advanced twice in one tick and animations started from a
//!   callback only begin moving on the next tick.
//! - Any change to the registry made while a record is processed makes the
//!   loop restart from the head instead of following a possibly stale link.

use crate::animation::{Animation, LegEnd, Setter};
use crate::config::SchedulerConfig;
use crate::error::{AnimationError, Result};
use crate::registry::{AnimationId, AnimationRegistry, Iter};
use pulse_core::{SystemTick, TickSource, Timer};
use smallvec::SmallVec;
use std::fmt;

/// Time in milliseconds an animation needs to cover `start..end` at `speed`
/// units per second
///
/// Never returns 0, so the result is always a usable duration. A zero speed
/// is treated as 1 unit per second.
pub fn time_for_speed(speed: u32, start: i32, end: i32) -> u32 {
    let distance = u64::from(start.abs_diff(end));
    let time = distance * 1000 / u64::from(speed.max(1));
    u32::try_from(time).unwrap_or(u32::MAX).max(1)
}

/// The animation scheduler that ticks all running animations
///
/// `T` is the target handle: whatever identifies the animated object
/// (a widget id, a slotmap key, ...). The scheduler only compares targets,
/// it never looks inside them.
///
/// # Example
///
/// ```ignore
/// let mut scheduler = AnimationScheduler::new(SystemTick::new(), SchedulerConfig::default());
/// let set_opacity = Setter::new(|_, widget, value| tree.set_opacity(widget, value));
///
/// scheduler.start(
///     &Animation::new(widget)
///         .with_setter(set_opacity.clone())
///         .with_values(0, 255)
///         .with_duration(200),
/// )?;
///
/// // In the host loop
/// scheduler.poll();
/// ```
pub struct AnimationScheduler<T> {
    registry: AnimationRegistry<T>,
    clock: Box<dyn TickSource>,
    timer: Timer,
    config: SchedulerConfig,
    /// Tick count at the end of the previous run
    last_run: u32,
    run_round: bool,
    list_changed: bool,
}

impl<T> AnimationScheduler<T>
where
    T: Copy + PartialEq + fmt::Debug,
{
    /// Create a scheduler and register its timer
    ///
    /// The timer starts paused and only runs while animations are registered.
    pub fn new<C>(clock: C, config: SchedulerConfig) -> Self
    where
        C: TickSource + 'static,
    {
        let now = clock.now();
        let mut scheduler = Self {
            registry: AnimationRegistry::new(),
            clock: Box::new(clock),
            timer: Timer::new(config.period_ms, now),
            config,
            last_run: now,
            run_round: false,
            list_changed: false,
        };
        scheduler.mark_list_change();
        scheduler.list_changed = false;
        scheduler
    }

    /// Create a scheduler on the wall clock with the default configuration
    pub fn with_system_clock() -> Self {
        Self::new(SystemTick::new(), SchedulerConfig::default())
    }

    /// The timer the host loop should drive this scheduler with
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Change the tick cadence
    pub fn set_period(&mut self, period_ms: u32) {
        self.config.period_ms = period_ms;
        self.timer.set_period(period_ms);
    }

    /// Start an animation described by `animation`
    ///
    /// An animation already running with the same target and setter is
    /// cancelled first. The descriptor is cloned, so the caller keeps it.
    /// If the animation applies immediately its setter is called with the
    /// start value before this returns.
    pub fn start(&mut self, animation: &Animation<T>) -> Result<AnimationId> {
        let target = animation.target;

        // Only one animation per (target, setter); without a setter the
        // cancel would wipe every animation of the target
        if let Some(setter) = animation.setter.as_ref() {
            self.cancel(target, Some(setter));
        }

        if let Some(capacity) = self.config.capacity {
            if self.registry.len() >= capacity {
                tracing::warn!(?target, capacity, "Animation start rejected: registry full");
                return Err(AnimationError::CapacityExceeded { capacity });
            }
        }

        // The timer was paused while the registry was empty; its last run
        // mark is stale
        if self.registry.is_empty() {
            self.last_run = self.clock.now();
        }

        let mut record = animation.clone();
        record.duration_original = record.duration;
        record.run_round = self.run_round;
        record.started = false;

        let apply_now = record.apply_immediately;
        if apply_now {
            if let Some(offset) = record.value_getter.as_ref().map(|getter| getter(target)) {
                record.shift_values(offset);
            }
            if record.setter.is_some() {
                record.current_value = Some(record.start_value);
            }
        }
        let setter = record.setter.clone();
        let start_value = record.start_value;

        let id = self.registry.push_front(record);
        tracing::trace!(?target, ?id, "Animation started");

        if apply_now {
            if let Some(setter) = setter {
                setter.call(self, target, start_value);
            }
        }

        // Matters when a callback starts an animation in the middle of a tick
        self.mark_list_change();

        Ok(id)
    }

    /// Cancel the animations of `target`
    ///
    /// With a setter only the exact `(target, setter)` match is cancelled,
    /// with `None` every animation of the target is. Returns whether anything
    /// was cancelled.
    pub fn cancel(&mut self, target: T, setter: Option<&Setter<T>>) -> bool {
        let matches: SmallVec<[AnimationId; 4]> = self
            .registry
            .iter()
            .filter(|(_, anim)| {
                anim.target == target
                    && setter.map_or(true, |setter| anim.setter.as_ref() == Some(setter))
            })
            .map(|(id, _)| id)
            .collect();

        for &id in &matches {
            self.registry.remove(id);
            tracing::trace!(?target, ?id, "Animation cancelled");
            self.mark_list_change();
        }

        !matches.is_empty()
    }

    /// Cancel every running animation
    pub fn cancel_all(&mut self) {
        tracing::debug!(count = self.registry.len(), "Cancelling all animations");
        self.registry.clear();
        self.mark_list_change();
    }

    /// Find the running animation of `target` driven by exactly `setter`
    pub fn find(&self, target: T, setter: Option<&Setter<T>>) -> Option<&Animation<T>> {
        self.registry
            .iter()
            .map(|(_, anim)| anim)
            .find(|anim| anim.target == target && anim.setter.as_ref() == setter)
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation<T>> {
        self.registry.get(id)
    }

    /// Number of running animations
    pub fn count_running(&self) -> usize {
        self.registry.len()
    }

    /// Iterate over running animations, most recently started first
    pub fn iter(&self) -> Iter<'_, T> {
        self.registry.iter()
    }

    /// Advance animations right away, outside the timer cadence
    ///
    /// Use this to keep animation state current across a long blocking
    /// operation during which the timer can't fire.
    pub fn force_tick_now(&mut self) {
        self.tick();
    }

    /// Run a tick if the scheduler's timer is due
    ///
    /// Returns true if a tick ran.
    pub fn poll(&mut self) -> bool {
        if self.timer.fire_if_due(self.clock.now()) {
            self.tick();
            true
        } else {
            false
        }
    }

    /// Milliseconds the host may sleep before the next [`poll`](Self::poll)
    ///
    /// `None` while nothing is running.
    pub fn time_until_next_tick(&self) -> Option<u32> {
        self.timer.time_until_due(self.clock.now())
    }

    /// Advance every running animation by the time elapsed since the last run
    pub fn tick(&mut self) {
        let elapsed = self.clock.elapsed_since(self.last_run);
        let elapsed = i32::try_from(elapsed).unwrap_or(i32::MAX);

        self.run_round = !self.run_round;

        let mut cursor = self.registry.head();
        while let Some(id) = cursor {
            self.list_changed = false;

            self.advance(id, elapsed);

            // Links read before a removal may point at freed records
            cursor = if self.list_changed || !self.registry.contains(id) {
                self.registry.head()
            } else {
                self.registry.next(id)
            };
        }

        self.last_run = self.clock.now();
    }

    fn advance(&mut self, id: AnimationId, elapsed: i32) {
        let round = self.run_round;
        let Some(anim) = self.registry.get_mut(id) else {
            return;
        };
        if anim.run_round == round {
            return;
        }
        anim.run_round = round;

        // The leg starts moving in this tick
        let new_elapsed = anim.elapsed.saturating_add(elapsed);
        if !anim.started && new_elapsed >= 0 {
            anim.started = true;
            if !anim.apply_immediately {
                let target = anim.target;
                if let Some(offset) = anim.value_getter.as_ref().map(|getter| getter(target)) {
                    anim.shift_values(offset);
                }
            }
            if let Some(on_start) = anim.on_start.clone() {
                let snapshot = anim.clone();
                on_start(self, &snapshot);
            }
        }

        let Some(anim) = self.registry.get_mut(id) else {
            return;
        };
        anim.elapsed = anim.elapsed.saturating_add(elapsed);
        if anim.elapsed < 0 {
            return;
        }

        let duration = anim.duration_as_elapsed();
        if anim.elapsed > duration {
            anim.elapsed = duration;
        }

        let value = anim.compute_value();
        if anim.current_value != Some(value) {
            anim.current_value = Some(value);
            if let Some(setter) = anim.setter.clone() {
                let target = anim.target;
                setter.call(self, target, value);
            }
        }

        let leg_done = self
            .registry
            .get(id)
            .is_some_and(|anim| anim.elapsed >= anim.duration_as_elapsed());
        if leg_done {
            self.complete_leg(id);
        }
    }

    fn complete_leg(&mut self, id: AnimationId) {
        let Some(anim) = self.registry.get_mut(id) else {
            return;
        };

        match anim.finish_leg() {
            LegEnd::Restarted => {
                let target = anim.target;
                tracing::trace!(
                    ?target,
                    ?id,
                    playback = anim.playback_phase,
                    "Animation leg restarted"
                );
            }
            LegEnd::Finished => {
                // Remove before notifying so the callback sees the animation
                // as gone and may freely change the registry
                let Some(finished) = self.registry.remove(id) else {
                    return;
                };
                self.mark_list_change();
                let target = finished.target;
                tracing::trace!(?target, ?id, "Animation ready");

                if let Some(on_ready) = finished.on_ready.clone() {
                    on_ready(self, &finished);
                }
            }
        }
    }

    /// Record a registry change and pause the timer while there is nothing
    /// to animate
    fn mark_list_change(&mut self) {
        self.list_changed = true;
        self.timer.pause(self.registry.is_empty());
    }
}

impl<T> Drop for AnimationScheduler<T> {
    fn drop(&mut self) {
        self.timer.release();
    }
}
