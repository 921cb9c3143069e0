//! Scheduler configuration

/// Default cadence of the animation timer (about 33 ticks per second)
pub const DEFAULT_PERIOD_MS: u32 = 30;

/// Configuration for an [`AnimationScheduler`](crate::AnimationScheduler)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Period of the timer the scheduler registers, in milliseconds
    pub period_ms: u32,
    /// Maximum number of running animations (`None` = unbounded)
    pub capacity: Option<usize>,
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD_MS,
            capacity: None,
        }
    }

    /// Builder: set the timer period
    pub fn with_period_ms(mut self, period_ms: u32) -> Self {
        self.period_ms = period_ms;
        self
    }

    /// Builder: limit the number of running animations
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}
