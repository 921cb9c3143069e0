//! Pulse Animation System
//!
//! Timer-driven integer property animations.
//!
//! # Features
//!
//! - **Scheduler**: Advances every running animation once per timer tick and
//!   pushes the new values into their targets through a setter
//! - **Paths**: Linear, ease-in/out, overshoot, bounce, step and custom paths
//!   on a fixed-point progress scale
//! - **Repeat & Playback**: N-times or infinite repetition, optional backward
//!   leg with its own duration and delay
//! - **Re-entrant Callbacks**: Start, ready and setter callbacks may start or
//!   cancel animations from inside a tick
//! - **Idle Cost**: The scheduler's timer is paused while nothing runs

pub mod animation;
pub mod config;
pub mod easing;
pub mod error;
pub mod registry;
pub mod scheduler;

pub use animation::{
    Animation, AnimationCallback, Repeat, Setter, ValueGetter, DEFAULT_DURATION_MS,
};
pub use config::{SchedulerConfig, DEFAULT_PERIOD_MS};
pub use easing::{
    path_bounce, path_ease_in, path_ease_in_out, path_ease_out, path_linear, path_overshoot,
    path_step, CustomPath, Easing, Progress, DEFAULT_EASING,
};
pub use error::{AnimationError, Result};
pub use registry::{AnimationId, AnimationRegistry};
pub use scheduler::{time_for_speed, AnimationScheduler};
