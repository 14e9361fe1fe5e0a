//! Requantization entry points: apply a quantized multiplier and shift to an accumulator.
pub mod baseline;
pub mod even;
pub mod quantize;

use crate::config::{RescaleConfig, RoundingMode};
use crate::trace;

/// Smallest accepted shift (right shift by 31 extra bits).
pub const MIN_SHIFT: i32 = -31;
/// Largest accepted shift (left shift headroom).
pub const MAX_SHIFT: i32 = 7;

/// Rescaling context with an explicit mode and trace flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rescaler {
    config: RescaleConfig,
}

impl Rescaler {
    pub fn new(config: RescaleConfig) -> Self { Self { config } }

    pub fn with_mode(mode: RoundingMode) -> Self { Self::new(RescaleConfig::new(mode, false)) }

    /// Context built from the memoized process-wide settings.
    pub fn process() -> Self { Self::new(RescaleConfig::process()) }

    pub fn config(&self) -> RescaleConfig { self.config }

    pub fn mode(&self) -> RoundingMode { self.config.mode }

    /// Rescale one accumulator.
    #[inline]
    pub fn apply(&self, x: i32, multiplier: i32, shift: i32) -> i32 {
        if self.config.trace { trace::before(x, multiplier, shift); }
        let result = match self.config.mode {
            RoundingMode::Baseline => baseline::round(x, multiplier, shift),
            RoundingMode::EvenRound => even::round(x, multiplier, shift),
        };
        if self.config.trace { trace::after(x, multiplier, shift, result); }
        result
    }
}

/// Process-wide entry point.
///
/// The mode (`TF_QUANTIZED_ROUND`) and trace flag (`TF_SHOW_DATA`) are read on the first
/// call and never again.
#[inline]
pub fn multiply_by_quantized_multiplier(x: i32, multiplier: i32, shift: i32) -> i32 {
    Rescaler::process().apply(x, multiplier, shift)
}
