//! Rule-based generation of time-windowed consumption recommendations
//! from a day's price curve.

use serde_json::json;
use std::cmp::Ordering;

use crate::analysis::classifier::{classify_price, mean_price};
use crate::models::price::{PriceLevel, PricePoint};
use crate::models::recommendation::{
    ActionData, Priority, RecommendationCandidate, RecommendationType, TimeWindow,
};
use crate::recommendations::tips::{RandomTipPicker, TipPicker, TIPS};

/// How many upcoming cheap hours the analysis keeps.
const OPTIMAL_HOUR_COUNT: usize = 3;
/// How many upcoming expensive hours the analysis keeps.
const AVOID_HOUR_COUNT: usize = 2;
/// Width of the window suggested around a future optimal hour.
const OPTIMAL_WINDOW_HOURS: u32 = 2;
/// Width of the window proposed for a device schedule.
const DEVICE_WINDOW_HOURS: u32 = 4;
/// Fixed savings estimate shown on device scheduling proposals.
const DEVICE_SAVINGS_PERCENT: f64 = 60.0;
/// The single illustrative appliance used for scheduling proposals.
const DEVICE_TYPE: &str = "washing machine";

/// Derived view of a day's curve relative to the current hour.
#[derive(Debug, Clone)]
pub struct PriceAnalysis {
    pub current_price: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub classification: PriceLevel,
    /// The lowest-priced hours strictly after the current one, cheapest
    /// first.
    pub next_optimal_hours: Vec<u8>,
    /// Upcoming hours classified high, in chronological order.
    pub next_avoid_hours: Vec<u8>,
    /// Percent saved by moving from the current price to the day's
    /// minimum, rounded and clamped to zero.
    pub savings_opportunity: f64,
}

impl PriceAnalysis {
    /// Earliest of the kept optimal hours; the hour candidate windows
    /// reference.
    pub fn nearest_optimal_hour(&self) -> Option<u8> {
        self.next_optimal_hours.iter().min().copied()
    }
}

/// Normalize an hour onto the 24-hour clock as `HH:00`.
pub fn format_hour(hour: u32) -> String {
    format!("{:02}:00", hour % 24)
}

/// Analyze a day's series relative to `current_hour`.
///
/// A missing entry for the current hour counts as a price of 0.0, which
/// also zeroes the savings figure rather than dividing by it.
pub fn analyze_series(series: &[PricePoint], current_hour: u8) -> PriceAnalysis {
    let current_price = series
        .iter()
        .find(|p| p.hour == current_hour)
        .map(|p| p.price)
        .unwrap_or(0.0);

    let average = mean_price(series);
    let min = series.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
    let max = series
        .iter()
        .map(|p| p.price)
        .fold(f64::NEG_INFINITY, f64::max);
    let classification = classify_price(current_price, series);

    let mut future: Vec<&PricePoint> = series.iter().filter(|p| p.hour > current_hour).collect();
    future.sort_by(|a, b| {
        a.price
            .partial_cmp(&b.price)
            .unwrap_or(Ordering::Equal)
            .then(a.hour.cmp(&b.hour))
    });
    let next_optimal_hours: Vec<u8> = future
        .iter()
        .take(OPTIMAL_HOUR_COUNT)
        .map(|p| p.hour)
        .collect();

    let mut next_avoid_hours: Vec<u8> = series
        .iter()
        .filter(|p| p.hour > current_hour && classify_price(p.price, series) == PriceLevel::High)
        .map(|p| p.hour)
        .collect();
    next_avoid_hours.sort_unstable();
    next_avoid_hours.truncate(AVOID_HOUR_COUNT);

    let savings_opportunity = if current_price > 0.0 {
        (((current_price - min) / current_price) * 100.0).round().max(0.0)
    } else {
        0.0
    };

    PriceAnalysis {
        current_price,
        average,
        min,
        max,
        classification,
        next_optimal_hours,
        next_avoid_hours,
        savings_opportunity,
    }
}

/// Turns a day's price curve into an ordered list of recommendation
/// candidates. Stateless per call; identity and lifecycle are the
/// notification store's job.
pub struct RecommendationEngine {
    tip_picker: Box<dyn TipPicker>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self {
            tip_picker: Box::new(RandomTipPicker),
        }
    }

    /// Build an engine with a custom tip picker (tests pin the choice).
    pub fn with_tip_picker(tip_picker: Box<dyn TipPicker>) -> Self {
        Self { tip_picker }
    }

    /// Generate candidates for the given series and hour. The candidate
    /// rules are independent of each other; emission order is fixed:
    /// optimal time, avoid usage, schedule device, tip of the day.
    pub fn generate(&self, series: &[PricePoint], current_hour: u8) -> Vec<RecommendationCandidate> {
        if series.is_empty() {
            return Vec::new();
        }

        let analysis = analyze_series(series, current_hour);
        let mut candidates = Vec::new();

        if let Some(candidate) = self.optimal_time(&analysis, current_hour) {
            candidates.push(candidate);
        }
        if let Some(candidate) = self.avoid_usage(&analysis, current_hour) {
            candidates.push(candidate);
        }
        if let Some(candidate) = self.schedule_device(&analysis, current_hour) {
            candidates.push(candidate);
        }
        candidates.push(self.tip_of_day(current_hour));

        candidates
    }

    fn optimal_time(
        &self,
        analysis: &PriceAnalysis,
        current_hour: u8,
    ) -> Option<RecommendationCandidate> {
        if analysis.classification == PriceLevel::Low {
            let candidate = RecommendationCandidate::new(
                RecommendationType::OptimalTime,
                "Cheap electricity right now".to_string(),
                format!(
                    "The price is in today's low band at {:.3} EUR/kWh. Good moment to run heavy appliances.",
                    analysis.current_price
                ),
                Priority::High,
            )
            .with_action_data(ActionData {
                savings_percent: Some(analysis.savings_opportunity),
                ..ActionData::default()
            })
            .with_metadata("currentHour", json!(current_hour));
            return Some(candidate);
        }

        let start = analysis.nearest_optimal_hour()?;
        let window = TimeWindow {
            start: format_hour(u32::from(start)),
            end: format_hour(u32::from(start) + OPTIMAL_WINDOW_HOURS),
        };
        let candidate = RecommendationCandidate::new(
            RecommendationType::OptimalTime,
            format!("Cheaper electricity at {}", window.start),
            format!(
                "Prices drop later today. Consider waiting for the {} - {} window.",
                window.start, window.end
            ),
            Priority::Medium,
        )
        .with_action_data(ActionData {
            time_window: Some(window),
            ..ActionData::default()
        })
        .with_metadata("currentHour", json!(current_hour));
        Some(candidate)
    }

    fn avoid_usage(
        &self,
        analysis: &PriceAnalysis,
        current_hour: u8,
    ) -> Option<RecommendationCandidate> {
        if analysis.classification != PriceLevel::High {
            return None;
        }
        let next_expensive = *analysis.next_avoid_hours.first()?;

        let window = TimeWindow {
            start: format_hour(u32::from(current_hour)),
            end: format_hour(u32::from(next_expensive) + 1),
        };
        let candidate = RecommendationCandidate::new(
            RecommendationType::AvoidUsage,
            "Expensive hours ahead".to_string(),
            format!(
                "The price is high at {:.3} EUR/kWh. Avoid heavy consumption between {} and {}.",
                analysis.current_price, window.start, window.end
            ),
            Priority::High,
        )
        .with_action_data(ActionData {
            time_window: Some(window),
            ..ActionData::default()
        })
        .with_metadata("currentHour", json!(current_hour));
        Some(candidate)
    }

    fn schedule_device(
        &self,
        analysis: &PriceAnalysis,
        current_hour: u8,
    ) -> Option<RecommendationCandidate> {
        let start = analysis.nearest_optimal_hour()?;

        let window = TimeWindow {
            start: format_hour(u32::from(start)),
            end: format_hour(u32::from(start) + DEVICE_WINDOW_HOURS),
        };
        let candidate = RecommendationCandidate::new(
            RecommendationType::ScheduleDevice,
            format!("Schedule your {}", DEVICE_TYPE),
            format!(
                "The cheapest upcoming window starts at {}. Program the {} between {} and {}.",
                window.start, DEVICE_TYPE, window.start, window.end
            ),
            Priority::Medium,
        )
        .with_action_data(ActionData {
            time_window: Some(window),
            savings_percent: Some(DEVICE_SAVINGS_PERCENT),
            device_type: Some(DEVICE_TYPE.to_string()),
        })
        .with_metadata("currentHour", json!(current_hour));
        Some(candidate)
    }

    fn tip_of_day(&self, current_hour: u8) -> RecommendationCandidate {
        let index = self.tip_picker.pick(TIPS.len()).min(TIPS.len() - 1);
        RecommendationCandidate::new(
            RecommendationType::TipOfDay,
            "Tip of the day".to_string(),
            TIPS[index].to_string(),
            Priority::Low,
        )
        .with_metadata("currentHour", json!(current_hour))
        .with_metadata("tipIndex", json!(index))
    }
}
