/// Single rounding shift: `(x * multiplier + 2^(total_shift-1)) >> total_shift` with
/// `total_shift = 31 - shift`.
///
/// Equivalent to a saturating doubling multiply-high followed by a rounding right shift,
/// without the double rounding and symmetric rounding of the reference formulation.
/// Ties go toward +inf.
///
/// Preconditions: `multiplier >= 0` and `shift` in `[-31, 7]`. A shift outside that range
/// panics. The result is range checked in debug builds only; release builds truncate.
#[inline]
pub fn round(x: i32, multiplier: i32, shift: i32) -> i32 {
    assert!(shift >= -31, "shift {} below minimum -31", shift);
    assert!(shift <= 7, "shift {} above maximum 7", shift);
    debug_assert!(multiplier >= 0, "multiplier {} must be non-negative", multiplier);

    let total_shift = 31 - shift;
    let bias = 1i64 << (total_shift - 1);
    // |x * multiplier| <= 2^62 and bias <= 2^61, so this cannot overflow i64.
    let result = ((x as i64) * (multiplier as i64) + bias) >> total_shift;

    debug_assert!(result >= i32::MIN as i64, "rescaled value {} below i32 range", result);
    debug_assert!(result <= i32::MAX as i64, "rescaled value {} above i32 range", result);
    result as i32
}
