// Runs as its own process: first use happens on many threads at once.
use requant::config::{process_mode, MODE_ENV, TRACE_ENV};
use requant::{multiply_by_quantized_multiplier, RoundingMode};

#[test]
fn concurrent_first_use_sees_one_mode() {
    std::env::set_var(MODE_ENV, "EV");
    std::env::remove_var(TRACE_ENV);

    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| (process_mode(), multiply_by_quantized_multiplier(7, 1 << 30, 2))))
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    // 7 * 2 / 4 = 3.5 -> 4
    assert!(results.iter().all(|&r| r == (RoundingMode::EvenRound, 4)), "{:?}", results);
}
