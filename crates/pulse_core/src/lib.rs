//! Pulse Core Runtime
//!
//! The platform-facing primitives the Pulse animation system is driven by:
//!
//! - **Tick Source**: Monotonic millisecond clock, real or manually advanced
//! - **Periodic Timer**: Pausable fixed-cadence timer registration
//! - **Shape Math**: Fixed-point linear mapping and cubic Bezier evaluation
//!
//! # Example
//!
//! ```rust
//! use pulse_core::{ManualTick, TickSource, Timer};
//!
//! let clock = ManualTick::new();
//! let timer = Timer::new(30, clock.now());
//!
//! clock.advance(10);
//! assert!(!timer.fire_if_due(clock.now()));
//!
//! clock.advance(20);
//! assert!(timer.fire_if_due(clock.now()));
//! ```

pub mod math;
pub mod tick;
pub mod timer;

pub use math::{bezier3, map, ANIM_RESOLUTION, ANIM_RES_SHIFT, BEZIER_VAL_MAX};
pub use tick::{ManualTick, SystemTick, TickSource};
pub use timer::Timer;
