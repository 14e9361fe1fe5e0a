use crate::error::{RescaleError, Result};
use crate::rescale::{MAX_SHIFT, MIN_SHIFT};

/// Split a finite, positive `v` into `(m, e)` with `m` in `[0.5, 1)` and `v = m * 2^e`.
fn frexp(v: f64) -> (f64, i32) {
    const EXP_MASK: u64 = 0x7ff << 52;
    let bits = v.to_bits();
    let biased = ((bits & EXP_MASK) >> 52) as i32;
    if biased == 0 {
        // Subnormal: normalize first.
        let (m, e) = frexp(v * 2f64.powi(54));
        return (m, e - 54);
    }
    let m = f64::from_bits((bits & !EXP_MASK) | (1022u64 << 52));
    (m, biased - 1022)
}

/// Convert a real, non-negative scale into `(multiplier, shift)` such that
/// `multiplier * 2^(shift - 31)` approximates `real`.
///
/// A non-zero multiplier lands in `[2^30, 2^31)`. Scales too small to be represented with
/// shift -31 flush to `(0, 0)`.
pub fn quantize_multiplier(real: f64) -> Result<(i32, i32)> {
    if !real.is_finite() {
        return Err(RescaleError::NonFiniteMultiplier(real));
    }
    if real < 0.0 {
        return Err(RescaleError::NegativeMultiplier(real));
    }
    if real == 0.0 {
        return Ok((0, 0));
    }
    let (m, mut shift) = frexp(real);
    let mut q = (m * (1i64 << 31) as f64).round() as i64;
    debug_assert!(q <= 1i64 << 31);
    if q == 1i64 << 31 {
        q /= 2;
        shift += 1;
    }
    if shift < MIN_SHIFT {
        return Ok((0, 0));
    }
    if shift > MAX_SHIFT {
        return Err(RescaleError::MultiplierTooLarge { real, shift });
    }
    Ok((q as i32, shift))
}

/// The real scale encoded by `(multiplier, shift)`.
pub fn dequantize_multiplier(multiplier: i32, shift: i32) -> f64 {
    multiplier as f64 * 2f64.powi(shift - 31)
}
