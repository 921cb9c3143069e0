//! Animation error types

use thiserror::Error;

/// Errors returned when registering animations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// The registry already holds as many animations as it is allowed to
    #[error("Animation registry is full ({capacity} running)")]
    CapacityExceeded { capacity: usize },
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
