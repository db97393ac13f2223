//! Error types for clockface
//!
//! Painting itself has no recoverable failure modes; these errors only come
//! from constructing values (time samples, configuration) and from the
//! scheduler running out of room.

use thiserror_no_std::Error;

/// Errors raised when building clock values from untrusted input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClockError {
    /// A time field is outside its documented range
    #[error("{field} out of range: {value} (max: {max})")]
    FieldOutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// Value that was supplied
        value: u32,
        /// Largest accepted value
        max: u32,
    },

    /// A configuration value is unusable
    #[error("Invalid config value: {param}")]
    InvalidConfig {
        /// Parameter description
        param: &'static str,
    },
}

/// Errors raised by a [`Scheduler`](crate::refresh::Scheduler)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// No room left for another pending task
    #[error("Timer queue capacity exceeded (max: {max})")]
    QueueFull {
        /// Maximum number of pending tasks
        max: usize,
    },
}
