/// Round-to-even rescaling path.
///
/// The accumulator is scaled by `shift` itself (as a multiplicative factor) and then
/// shifted right by `shift` with ties going to the even neighbour. The result goes through
/// an `f64` round trip before narrowing. `multiplier` does not participate: this path
/// rescales by `shift / 2^shift` only, and callers expecting multiplier-aware rounding in
/// this mode will not get it.
///
/// `shift` is reinterpreted as unsigned for both the factor and the shift count, and shift
/// counts keep only their low 6 bits. A negative shift therefore multiplies by
/// `2^32 + shift` and shifts by `64 + shift`, which lands near `x / 2`.
///
/// Preconditions: `shift` in `[-31, 7]`; anything outside panics.
/// `shift == 0` always yields 0 since the accumulator is multiplied by zero.
#[inline]
pub fn round(x: i32, multiplier: i32, shift: i32) -> i32 {
    let _ = multiplier;
    assert!(shift >= -31, "shift {} below minimum -31", shift);
    assert!(shift <= 7, "shift {} above maximum 7", shift);

    let s = shift as u32;
    let acc = (x as i64).wrapping_mul(s as i64);
    let rounded = round_to_even(acc, s);
    // Either the factor is at most 7 against a shift of at least 1, or the count is at
    // least 33 against |acc| < 2^63: both fit in i32.
    (rounded as f64) as i32
}

/// `(v + ((v >> s) & 1) + (2^(s-1) - 1)) >> s`: half-ULP bias minus one, plus one more
/// when the lowest kept bit is set, so exact ties land on the even result.
/// Shift counts are taken modulo 64 and additions wrap. `s == 0` is the identity.
#[inline]
pub fn round_to_even(v: i64, s: u32) -> i64 {
    if s == 0 {
        return v;
    }
    let odd = v.wrapping_shr(s) & 1;
    let bias = 1i64.wrapping_shl(s.wrapping_sub(1)).wrapping_sub(1);
    v.wrapping_add(odd).wrapping_add(bias).wrapping_shr(s)
}
