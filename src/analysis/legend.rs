//! Equal-width legend bands for chart display.
//!
//! This quartile-of-range scheme is intentionally independent of the
//! mean-relative thresholds in [`super::classifier`]: the two disagree
//! near band boundaries and are kept as two separate schemes rather
//! than unified.

use serde::Serialize;

use crate::models::price::{PriceLevel, PricePoint};

/// Which aggregate view a legend describes; picks the label suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPeriod {
    Day,
    Week,
    Month,
}

impl LegendPeriod {
    fn suffix(self) -> &'static str {
        match self {
            LegendPeriod::Day => "per hour",
            LegendPeriod::Week => "weekly average",
            LegendPeriod::Month => "monthly average",
        }
    }
}

/// One of four contiguous display bands covering the series range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendBand {
    pub level: PriceLevel,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub display_label: String,
}

/// Partition `[min, max]` of the series into four equal-width bands.
///
/// Bounds are derived solely from the series passed in; consecutive
/// bands share a boundary so the partition has no gaps or overlaps.
/// An empty series yields an empty band list.
pub fn generate_legend(series: &[PricePoint], period: LegendPeriod) -> Vec<LegendBand> {
    if series.is_empty() {
        return Vec::new();
    }

    let min = series.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max = series
        .iter()
        .map(|p| p.price)
        .fold(f64::NEG_INFINITY, f64::max);
    let quarter = (max - min) / 4.0;

    let levels = [
        PriceLevel::Low,
        PriceLevel::Medium,
        PriceLevel::High,
        PriceLevel::VeryHigh,
    ];

    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| {
            let lower = min + quarter * i as f64;
            // Pin the final bound to the exact maximum so float error
            // cannot leave the top price outside the last band.
            let upper = if i == levels.len() - 1 {
                max
            } else {
                min + quarter * (i + 1) as f64
            };
            LegendBand {
                level,
                lower_bound: lower,
                upper_bound: upper,
                display_label: format!(
                    "{:.3} - {:.3} EUR/kWh ({})",
                    lower,
                    upper,
                    period.suffix()
                ),
            }
        })
        .collect()
}
