//! Tolerances for comparing Monte Carlo estimates against exact values

#![allow(dead_code)]

/// Five standard deviations of a binomial proportion, never below 0.5pp
pub fn binomial_tolerance(p: f64, trials: u64) -> f64 {
    let sigma = (p * (1.0 - p) / trials as f64).sqrt();
    (5.0 * sigma).max(0.005)
}

pub fn assert_close(observed: f64, expected: f64, tolerance: f64) {
    assert!(
        (observed - expected).abs() <= tolerance,
        "observed {:.5}, expected {:.5} ± {:.5}",
        observed,
        expected,
        tolerance
    );
}
