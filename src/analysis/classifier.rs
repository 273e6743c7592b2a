//! Relative price-level classification against a day's reference series.

use crate::models::price::{PriceLevel, PricePoint};

/// Upper bound of the low band, as a fraction of the series mean.
pub const LOW_FACTOR: f64 = 0.7;
/// Upper bound of the medium band.
pub const MEDIUM_FACTOR: f64 = 1.1;
/// Upper bound of the high band; anything above is very high.
pub const HIGH_FACTOR: f64 = 1.3;

/// Classify a price relative to the mean of the reference series.
///
/// An empty series yields `Medium` so callers can classify
/// opportunistically before the day's data has arrived.
pub fn classify_price(price: f64, series: &[PricePoint]) -> PriceLevel {
    if series.is_empty() {
        return PriceLevel::Medium;
    }

    let avg = mean_price(series);
    if price <= avg * LOW_FACTOR {
        PriceLevel::Low
    } else if price <= avg * MEDIUM_FACTOR {
        PriceLevel::Medium
    } else if price <= avg * HIGH_FACTOR {
        PriceLevel::High
    } else {
        PriceLevel::VeryHigh
    }
}

/// Arithmetic mean of the series prices, 0.0 for an empty slice.
pub fn mean_price(series: &[PricePoint]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.iter().map(|p| p.price).sum::<f64>() / series.len() as f64
}
