//! Unit tests for the price-level classifier

use voltio::analysis::classifier::{classify_price, mean_price};
use voltio::models::price::PriceLevel;

use crate::common::day_series;

#[test]
fn test_classify_all_four_levels() {
    // Flat series, mean 0.20.
    let series = day_series(&[0.20; 24]);

    assert_eq!(classify_price(0.10, &series), PriceLevel::Low);
    assert_eq!(classify_price(0.13, &series), PriceLevel::Low);
    assert_eq!(classify_price(0.20, &series), PriceLevel::Medium);
    assert_eq!(classify_price(0.21, &series), PriceLevel::Medium);
    assert_eq!(classify_price(0.25, &series), PriceLevel::High);
    assert_eq!(classify_price(0.27, &series), PriceLevel::VeryHigh);
    assert_eq!(classify_price(1.0, &series), PriceLevel::VeryHigh);
}

#[test]
fn test_classify_thresholds_are_inclusive() {
    // Integer prices keep the threshold products exact enough to probe
    // the band edges themselves.
    let series = day_series(&[100.0, 100.0, 100.0, 100.0]);

    assert_eq!(classify_price(70.0, &series), PriceLevel::Low);
    assert_eq!(classify_price(110.0, &series), PriceLevel::Medium);
    assert_eq!(classify_price(130.0, &series), PriceLevel::High);
    assert_eq!(classify_price(130.1, &series), PriceLevel::VeryHigh);
}

#[test]
fn test_classify_empty_series_is_medium() {
    assert_eq!(classify_price(0.0, &[]), PriceLevel::Medium);
    assert_eq!(classify_price(0.15, &[]), PriceLevel::Medium);
    assert_eq!(classify_price(999.0, &[]), PriceLevel::Medium);
}

#[test]
fn test_classify_is_monotonic() {
    let series = day_series(&[0.08, 0.10, 0.12, 0.15, 0.18, 0.22, 0.25, 0.30]);

    let probes = [0.0, 0.05, 0.10, 0.13, 0.17, 0.19, 0.21, 0.24, 0.28, 0.40];
    for pair in probes.windows(2) {
        let lower = classify_price(pair[0], &series);
        let upper = classify_price(pair[1], &series);
        assert!(
            lower.band_index() <= upper.band_index(),
            "classification not monotonic between {} and {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_mean_price() {
    let series = day_series(&[0.10, 0.20, 0.30]);
    assert!((mean_price(&series) - 0.20).abs() < 1e-12);
    assert_eq!(mean_price(&[]), 0.0);
}
