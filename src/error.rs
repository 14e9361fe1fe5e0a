use thiserror::Error;

/// Errors for the fallible, off-hot-path operations.
///
/// Shift preconditions on the rounding kernels are not represented here: those are
/// fatal assertions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RescaleError {
    #[error("unrecognized rounding mode {0:?} (expected \"EV\" or \"baseline\")")]
    UnknownMode(String),

    #[error("real multiplier must be finite, got {0}")]
    NonFiniteMultiplier(f64),

    #[error("real multiplier must be non-negative, got {0}")]
    NegativeMultiplier(f64),

    #[error("real multiplier {real} needs shift {shift}, above the maximum of 7")]
    MultiplierTooLarge { real: f64, shift: i32 },

    #[error("length mismatch: {what} has {got} elements, expected {expected}")]
    LengthMismatch { what: &'static str, got: usize, expected: usize },
}

pub type Result<T> = std::result::Result<T, RescaleError>;
