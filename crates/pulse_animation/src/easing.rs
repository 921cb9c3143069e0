//! Path (easing) functions for animations
//!
//! A path maps the time position of an animation leg to the value that should
//! be applied. All built-in shapes work on the fixed-point progress scale of
//! [`pulse_core::ANIM_RESOLUTION`] and never touch floating point.

use pulse_core::{bezier3, map, ANIM_RESOLUTION, ANIM_RES_SHIFT};
use std::fmt;
use std::rc::Rc;

/// Timing and value range of one animation leg, as seen by a path function
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Time spent in the current leg (already clamped to `0..=duration`)
    pub elapsed: i32,
    /// Length of the current leg
    pub duration: u32,
    pub start_value: i32,
    pub end_value: i32,
}

impl Progress {
    /// Linear position in the leg on the `0..=ANIM_RESOLUTION` scale
    pub fn step(&self) -> i32 {
        let duration = i32::try_from(self.duration).unwrap_or(i32::MAX);
        map(self.elapsed, 0, duration, 0, ANIM_RESOLUTION)
    }

    /// Scale the value range by a fixed-point fraction and offset it by the start
    fn interpolate(&self, step: i32) -> i32 {
        let range = i64::from(self.end_value) - i64::from(self.start_value);
        let value = (i64::from(step) * range) >> ANIM_RES_SHIFT;
        saturate(value + i64::from(self.start_value))
    }

    fn bezier_step(&self, u1: i32, u2: i32) -> i32 {
        let t = self.step().max(0) as u32;
        bezier3(t, 0, u1, u2, ANIM_RESOLUTION)
    }
}

/// Clamp a widened path result back into the value range
fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN.into(), i32::MAX.into()) as i32
}

/// User supplied path function
pub type CustomPath = Rc<dyn Fn(&Progress) -> i32>;

/// Easing function type
#[derive(Clone, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Runs past the end value before settling on it
    Overshoot,
    /// Three decaying bounces against the end value
    Bounce,
    /// Jumps to the end value once the leg is over
    Step,
    Custom(CustomPath),
}

/// Path used when an animation doesn't choose one
pub const DEFAULT_EASING: Easing = Easing::Linear;

impl Easing {
    /// Wrap a closure as a custom path
    ///
    /// Any user data the path needs is captured by the closure.
    pub fn custom<F>(path: F) -> Self
    where
        F: Fn(&Progress) -> i32 + 'static,
    {
        Easing::Custom(Rc::new(path))
    }

    /// Compute the value for the given progress
    pub fn apply(&self, progress: &Progress) -> i32 {
        match self {
            Easing::Linear => path_linear(progress),
            Easing::EaseIn => path_ease_in(progress),
            Easing::EaseOut => path_ease_out(progress),
            Easing::EaseInOut => path_ease_in_out(progress),
            Easing::Overshoot => path_overshoot(progress),
            Easing::Bounce => path_bounce(progress),
            Easing::Step => path_step(progress),
            Easing::Custom(path) => path(progress),
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("Linear"),
            Easing::EaseIn => f.write_str("EaseIn"),
            Easing::EaseOut => f.write_str("EaseOut"),
            Easing::EaseInOut => f.write_str("EaseInOut"),
            Easing::Overshoot => f.write_str("Overshoot"),
            Easing::Bounce => f.write_str("Bounce"),
            Easing::Step => f.write_str("Step"),
            Easing::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Constant speed from start to end
pub fn path_linear(progress: &Progress) -> i32 {
    progress.interpolate(progress.step())
}

/// Slow start
pub fn path_ease_in(progress: &Progress) -> i32 {
    progress.interpolate(progress.bezier_step(50, 100))
}

/// Slow end
pub fn path_ease_out(progress: &Progress) -> i32 {
    progress.interpolate(progress.bezier_step(900, 950))
}

/// Slow start and end ("S" curve)
pub fn path_ease_in_out(progress: &Progress) -> i32 {
    progress.interpolate(progress.bezier_step(50, 952))
}

/// Overshoots the end value, then comes back to it
pub fn path_overshoot(progress: &Progress) -> i32 {
    progress.interpolate(progress.bezier_step(1000, 1300))
}

/// Falls onto the end value and bounces back three times
pub fn path_bounce(progress: &Progress) -> i32 {
    let mut t = progress.step().max(0) as u32;
    let mut diff = i64::from(progress.end_value) - i64::from(progress.start_value);

    // Five parts: the fall, then up/down twice with decaying height
    if t < 408 {
        t = (t * 2500) >> 10;
    } else if t < 614 {
        // The last step of the segment overshoots the scale; treat it as the end
        t = 1024_u32.checked_sub((t - 408) * 5).unwrap_or(1024);
        diff /= 20;
    } else if t < 819 {
        t = (t - 614) * 5;
        diff /= 20;
    } else if t < 921 {
        t = 1024 - (t - 819) * 10;
        diff /= 40;
    } else {
        t = (t - 921) * 10;
        diff /= 40;
    }

    let t = t.min(1024);
    let step = bezier3(t, 1024, 800, 500, 0);
    let offset = (i64::from(step) * diff) >> ANIM_RES_SHIFT;
    saturate(i64::from(progress.end_value) - offset)
}

/// No interpolation: start value until the leg ends, then the end value
pub fn path_step(progress: &Progress) -> i32 {
    let duration = i64::from(progress.duration);
    if i64::from(progress.elapsed) >= duration {
        progress.end_value
    } else {
        progress.start_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(elapsed: i32, duration: u32) -> Progress {
        Progress {
            elapsed,
            duration,
            start_value: 0,
            end_value: 100,
        }
    }

    #[test]
    fn test_linear_midpoint() {
        assert_eq!(path_linear(&at(0, 500)), 0);
        assert_eq!(path_linear(&at(250, 500)), 50);
        assert_eq!(path_linear(&at(500, 500)), 100);
    }

    #[test]
    fn test_linear_descending_range() {
        let progress = Progress {
            elapsed: 250,
            duration: 500,
            start_value: 100,
            end_value: 0,
        };
        assert_eq!(path_linear(&progress), 50);
    }

    #[test]
    fn test_linear_zero_duration_is_complete() {
        assert_eq!(path_linear(&at(0, 0)), 100);
    }

    #[test]
    fn test_ease_curves_hit_endpoints() {
        for easing in [
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::Overshoot,
            Easing::Bounce,
        ] {
            assert_eq!(easing.apply(&at(0, 500)), 0, "{:?} start", easing);
            assert_eq!(easing.apply(&at(500, 500)), 100, "{:?} end", easing);
        }
    }

    #[test]
    fn test_ease_in_lags_and_ease_out_leads() {
        let quarter = at(125, 500);
        let linear = path_linear(&quarter);

        assert!(path_ease_in(&quarter) < linear);
        assert!(path_ease_out(&quarter) > linear);
    }

    #[test]
    fn test_overshoot_passes_end_value() {
        // 75% of the leg: the curve is already beyond 100%
        assert_eq!(path_overshoot(&at(375, 500)), 109);
    }

    #[test]
    fn test_bounce_dips_below_end() {
        // Middle of the first bounce back
        let value = path_bounce(&at(511, 1024));
        assert_eq!(value, 97);

        // Top of the first bounce touches the end value again
        assert_eq!(path_bounce(&at(613, 1024)), 100);

        for elapsed in (0..=1024).step_by(8) {
            let value = path_bounce(&at(elapsed, 1024));
            assert!((0..=100).contains(&value), "bounce at {elapsed} = {value}");
        }
    }

    #[test]
    fn test_overshoot_saturates_at_value_limits() {
        let up = Progress {
            elapsed: 375,
            duration: 500,
            start_value: 0,
            end_value: 2_100_000_000,
        };
        assert_eq!(path_overshoot(&up), i32::MAX);

        let down = Progress {
            end_value: -2_100_000_000,
            ..up
        };
        assert_eq!(path_overshoot(&down), i32::MIN);
    }

    #[test]
    fn test_bounce_range_wider_than_i32() {
        let wide = |elapsed| Progress {
            elapsed,
            duration: 1000,
            start_value: -2_000_000_000,
            end_value: 2_000_000_000,
        };

        assert_eq!(path_bounce(&wide(0)), -2_000_000_000);
        assert_eq!(path_bounce(&wide(1000)), 2_000_000_000);
        for elapsed in (0..=1000).step_by(50) {
            let value = path_bounce(&wide(elapsed));
            assert!(
                (-2_000_000_000..=2_000_000_000).contains(&value),
                "bounce at {elapsed} = {value}"
            );
        }
    }

    #[test]
    fn test_step_jumps_at_end() {
        assert_eq!(path_step(&at(0, 500)), 0);
        assert_eq!(path_step(&at(499, 500)), 0);
        assert_eq!(path_step(&at(500, 500)), 100);
    }

    #[test]
    fn test_custom_path() {
        let easing = Easing::custom(|p| p.start_value + p.elapsed * 2);
        assert_eq!(easing.apply(&at(21, 500)), 42);
        assert_eq!(format!("{:?}", easing), "Custom(..)");
    }

    #[test]
    fn test_default_easing_is_linear() {
        let progress = at(100, 400);
        assert_eq!(DEFAULT_EASING.apply(&progress), path_linear(&progress));
        assert!(matches!(Easing::default(), Easing::Linear));
    }
}
