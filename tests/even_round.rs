use pretty_assertions::assert_eq;
use requant::rescale::{baseline, even};
use requant::{Rescaler, RoundingMode};

#[test]
fn paired_ties_differ_between_modes() {
    // Baseline: x * 2^29 * 2 / 2^31 = x / 2. Even: x * 1 / 2^1 = x / 2.
    // Both land on exact .5 for odd x; baseline rounds up, even picks the even neighbour.
    let cases = [(1, 1, 0), (3, 2, 2), (5, 3, 2), (7, 4, 4), (-1, 0, 0), (-3, -1, -2), (-5, -2, -2)];
    for (x, up, to_even) in cases {
        assert_eq!(baseline::round(x, 1 << 29, 1), up, "baseline x={}", x);
        assert_eq!(even::round(x, 1 << 29, 1), to_even, "even x={}", x);
    }
}

#[test]
fn ties_at_larger_shift() {
    // shift 3: x * 3 / 8. x=4 -> 1.5, x=20 -> 7.5
    assert_eq!(even::round(4, 0, 3), 2);
    assert_eq!(even::round(20, 0, 3), 8);
    // x=12 -> 4.5
    assert_eq!(even::round(12, 0, 3), 4);
}

#[test]
fn multiplier_is_not_used() {
    for x in [-999, -2, 0, 17, 123_456] {
        for shift in 0..=7 {
            let a = even::round(x, 0, shift);
            let b = even::round(x, 1 << 30, shift);
            let c = even::round(x, i32::MAX, shift);
            assert_eq!((a, a), (b, c), "x={} shift={}", x, shift);
        }
    }
}

#[test]
fn dispatch_through_rescaler() {
    let r = Rescaler::with_mode(RoundingMode::EvenRound);
    assert_eq!(r.apply(5, 1 << 29, 1), 2);
    assert_eq!(r.apply(i32::MAX, 1 << 30, 1), i32::MAX / 2 + 1);
}

#[test]
fn negative_shifts_are_valid_in_even_mode() {
    let r = Rescaler::with_mode(RoundingMode::EvenRound);
    // Factor 2^32 - 5, count 59
    assert_eq!(r.apply(1000, 1 << 30, -5), 0);
    assert_eq!(r.apply(-1000, 1 << 30, -5), 0);
    // Factor 2^32 - 31, count 33
    assert_eq!(r.apply(1000, 1 << 30, -31), 500);
    assert_eq!(r.apply(-1000, 1 << 30, -31), -500);
    assert_eq!(r.apply(0, 1 << 30, -31), 0);
}

#[test]
#[should_panic(expected = "below minimum")]
fn shift_below_range_is_fatal_in_even_mode() {
    Rescaler::with_mode(RoundingMode::EvenRound).apply(1, 1 << 30, -32);
}
