//! Animation records
//!
//! An [`Animation`] is both the descriptor a caller fills in and the live
//! record the scheduler advances. Starting an animation clones the descriptor
//! into the registry, so the caller's copy can be reused or inspected.
//!
//! ```ignore
//! use pulse_animation::{Animation, Easing, Repeat, Setter};
//!
//! let set_x = Setter::new(|_, widget: WidgetId, x| layout.set_x(widget, x));
//! let slide = Animation::new(widget)
//!     .with_setter(set_x.clone())
//!     .with_values(0, 240)
//!     .with_duration(300)
//!     .with_easing(Easing::EaseOut)
//!     .with_playback(300, 100)
//!     .with_repeat(Repeat::Infinite);
//! scheduler.start(&slide)?;
//! ```

use crate::easing::{Easing, Progress};
use crate::scheduler::AnimationScheduler;
use std::fmt;
use std::rc::Rc;

/// Default length of an animation leg in milliseconds
pub const DEFAULT_DURATION_MS: u32 = 500;

type SetterFn<T> = dyn Fn(&mut AnimationScheduler<T>, T, i32);

/// Applies an animated value to a target
///
/// Two setters are equal when they are clones of the same `Setter`, which is
/// how the scheduler keeps one animation per `(target, setter)` pair.
pub struct Setter<T>(Rc<SetterFn<T>>);

impl<T> Setter<T> {
    pub fn new<F>(apply: F) -> Self
    where
        F: Fn(&mut AnimationScheduler<T>, T, i32) + 'static,
    {
        Self(Rc::new(apply))
    }

    pub(crate) fn call(&self, scheduler: &mut AnimationScheduler<T>, target: T, value: i32) {
        (*self.0)(scheduler, target, value)
    }

    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for Setter<T> {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl<T> Eq for Setter<T> {}

impl<T> fmt::Debug for Setter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Setter({:p})", self.addr())
    }
}

/// Lifecycle callback, invoked with a snapshot of the record
pub type AnimationCallback<T> = Rc<dyn Fn(&mut AnimationScheduler<T>, &Animation<T>)>;

/// Reads the live value of a target, used to offset the animated range
pub type ValueGetter<T> = Rc<dyn Fn(T) -> i32>;

/// How many forward legs an animation runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Count(u16),
    Infinite,
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::Count(1)
    }
}

/// Result of reaching the end of a leg
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LegEnd {
    /// No repeats or playback left; the record must be removed
    Finished,
    /// The record was rewound (and possibly reversed) for another leg
    Restarted,
}

/// Convert a delay into the negative elapsed time it counts up from
fn countdown(delay_ms: u32) -> i32 {
    -i32::try_from(delay_ms).unwrap_or(i32::MAX)
}

/// A single integer animation on a target
#[derive(Clone)]
pub struct Animation<T> {
    pub(crate) target: T,
    pub(crate) setter: Option<Setter<T>>,
    pub(crate) start_value: i32,
    pub(crate) end_value: i32,
    pub(crate) current_value: Option<i32>,
    pub(crate) duration: u32,
    pub(crate) duration_original: u32,
    /// Negative while a start, repeat or playback delay is counting down
    pub(crate) elapsed: i32,
    pub(crate) easing: Easing,
    pub(crate) repeat: Repeat,
    pub(crate) repeat_delay: u32,
    /// Zero disables playback
    pub(crate) playback_duration: u32,
    pub(crate) playback_delay: u32,
    pub(crate) playback_phase: bool,
    pub(crate) on_start: Option<AnimationCallback<T>>,
    pub(crate) on_ready: Option<AnimationCallback<T>>,
    pub(crate) value_getter: Option<ValueGetter<T>>,
    pub(crate) apply_immediately: bool,
    /// Set once the current leg has left its delay
    pub(crate) started: bool,
    pub(crate) run_round: bool,
}

impl<T> Animation<T> {
    /// Describe an animation of `target` with default timing:
    /// 0 to 100 over 500ms, linear, one leg, applied immediately
    pub fn new(target: T) -> Self {
        Self {
            target,
            setter: None,
            start_value: 0,
            end_value: 100,
            current_value: None,
            duration: DEFAULT_DURATION_MS,
            duration_original: DEFAULT_DURATION_MS,
            elapsed: 0,
            easing: Easing::default(),
            repeat: Repeat::default(),
            repeat_delay: 0,
            playback_duration: 0,
            playback_delay: 0,
            playback_phase: false,
            on_start: None,
            on_ready: None,
            value_getter: None,
            apply_immediately: true,
            started: false,
            run_round: false,
        }
    }

    /// Builder: set the function applying values to the target
    pub fn with_setter(mut self, setter: Setter<T>) -> Self {
        self.setter = Some(setter);
        self
    }

    /// Builder: set the start and end values
    pub fn with_values(mut self, start: i32, end: i32) -> Self {
        self.start_value = start;
        self.end_value = end;
        self
    }

    /// Builder: set the length of the forward leg
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration = duration_ms;
        self.duration_original = duration_ms;
        self
    }

    /// Builder: wait before the first leg starts
    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.elapsed = countdown(delay_ms);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Builder: wait between repetitions
    pub fn with_repeat_delay(mut self, delay_ms: u32) -> Self {
        self.repeat_delay = delay_ms;
        self
    }

    /// Builder: play every forward leg back to the start value
    ///
    /// A zero `duration_ms` disables playback.
    pub fn with_playback(mut self, duration_ms: u32, delay_ms: u32) -> Self {
        self.playback_duration = duration_ms;
        self.playback_delay = delay_ms;
        self
    }

    /// Builder: called when the animation leaves its start delay
    pub fn with_start_cb<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut AnimationScheduler<T>, &Animation<T>) + 'static,
    {
        self.on_start = Some(Rc::new(callback));
        self
    }

    /// Builder: called once the animation is finished and removed
    pub fn with_ready_cb<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut AnimationScheduler<T>, &Animation<T>) + 'static,
    {
        self.on_ready = Some(Rc::new(callback));
        self
    }

    /// Builder: offset the start and end values by the target's live value
    pub fn with_value_getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(T) -> i32 + 'static,
    {
        self.value_getter = Some(Rc::new(getter));
        self
    }

    /// Builder: apply the start value (and read the value getter) when the
    /// animation is started instead of when its delay runs out
    pub fn with_apply_immediately(mut self, apply: bool) -> Self {
        self.apply_immediately = apply;
        self
    }

    pub fn target(&self) -> T
    where
        T: Copy,
    {
        self.target
    }

    pub fn setter(&self) -> Option<&Setter<T>> {
        self.setter.as_ref()
    }

    pub fn start_value(&self) -> i32 {
        self.start_value
    }

    pub fn end_value(&self) -> i32 {
        self.end_value
    }

    /// Last value handed to the setter, if any
    pub fn current_value(&self) -> Option<i32> {
        self.current_value
    }

    /// Length of the current leg
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Time spent in the current leg; negative while a delay is pending
    pub fn elapsed(&self) -> i32 {
        self.elapsed
    }

    /// Remaining delay before the current leg starts moving
    pub fn delay(&self) -> u32 {
        if self.elapsed < 0 {
            self.elapsed.unsigned_abs()
        } else {
            0
        }
    }

    pub fn easing(&self) -> &Easing {
        &self.easing
    }

    /// Forward legs left, counting the one in progress
    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    pub fn repeat_delay(&self) -> u32 {
        self.repeat_delay
    }

    pub fn playback_duration(&self) -> u32 {
        self.playback_duration
    }

    pub fn playback_delay(&self) -> u32 {
        self.playback_delay
    }

    /// Whether the backward leg is running
    pub fn is_playing_back(&self) -> bool {
        self.playback_phase
    }

    pub fn applies_immediately(&self) -> bool {
        self.apply_immediately
    }

    pub(crate) fn duration_as_elapsed(&self) -> i32 {
        i32::try_from(self.duration).unwrap_or(i32::MAX)
    }

    pub(crate) fn shift_values(&mut self, offset: i32) {
        self.start_value = self.start_value.saturating_add(offset);
        self.end_value = self.end_value.saturating_add(offset);
    }

    /// Value of the path at the current elapsed time
    pub(crate) fn compute_value(&self) -> i32 {
        self.easing.apply(&Progress {
            elapsed: self.elapsed,
            duration: self.duration,
            start_value: self.start_value,
            end_value: self.end_value,
        })
    }

    /// Decide what happens once `elapsed` has reached `duration`
    pub(crate) fn finish_leg(&mut self) -> LegEnd {
        let playback = self.playback_duration != 0;

        // Only forward legs count towards the repeat budget
        if !self.playback_phase {
            if let Repeat::Count(remaining) = &mut self.repeat {
                *remaining = remaining.saturating_sub(1);
            }
        }

        if self.repeat == Repeat::Count(0) && (!playback || self.playback_phase) {
            return LegEnd::Finished;
        }

        self.started = false;
        self.elapsed = countdown(self.repeat_delay);
        if playback {
            if !self.playback_phase {
                self.elapsed = countdown(self.playback_delay);
            }
            self.playback_phase = !self.playback_phase;
            std::mem::swap(&mut self.start_value, &mut self.end_value);
            self.duration = if self.playback_phase {
                self.playback_duration
            } else {
                self.duration_original
            };
        }

        LegEnd::Restarted
    }
}

impl<T: fmt::Debug> fmt::Debug for Animation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("target", &self.target)
            .field("setter", &self.setter)
            .field("start_value", &self.start_value)
            .field("end_value", &self.end_value)
            .field("current_value", &self.current_value)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("easing", &self.easing)
            .field("repeat", &self.repeat)
            .field("repeat_delay", &self.repeat_delay)
            .field("playback_duration", &self.playback_duration)
            .field("playback_delay", &self.playback_delay)
            .field("playback_phase", &self.playback_phase)
            .field("apply_immediately", &self.apply_immediately)
            .finish_non_exhaustive()
    }
}
