//! Unit tests for the recommendation engine

use voltio::models::price::PriceLevel;
use voltio::models::recommendation::{Priority, RecommendationType};
use voltio::recommendations::engine::{analyze_series, RecommendationEngine};
use voltio::recommendations::tips::{FixedTipPicker, TIPS};

use crate::common::flat_series_with;

fn engine_with_fixed_tip(index: usize) -> RecommendationEngine {
    RecommendationEngine::with_tip_picker(Box::new(FixedTipPicker(index)))
}

#[test]
fn test_empty_series_yields_no_candidates() {
    let engine = engine_with_fixed_tip(0);
    assert!(engine.generate(&[], 10).is_empty());
}

#[test]
fn test_tip_of_day_present_exactly_once() {
    let engine = engine_with_fixed_tip(2);
    let series = flat_series_with(0.15, &[]);

    let candidates = engine.generate(&series, 10);

    let tips: Vec<_> = candidates
        .iter()
        .filter(|c| c.kind == RecommendationType::TipOfDay)
        .collect();
    assert_eq!(tips.len(), 1);
    assert_eq!(tips[0].message, TIPS[2]);
    assert_eq!(tips[0].priority, Priority::Low);
}

#[test]
fn test_low_current_price_emits_act_now() {
    // 24 points averaging 0.15 with the current hour at 0.09 (below
    // 0.7 * avg) and the day's minimum at 0.08.
    let series = flat_series_with(0.15, &[(10, 0.09), (22, 0.08), (20, 0.28)]);

    let analysis = analyze_series(&series, 10);
    assert_eq!(analysis.classification, PriceLevel::Low);
    assert!((analysis.average - 0.15).abs() < 1e-9);
    assert!((analysis.savings_opportunity - 11.0).abs() < 1e-9);

    let engine = engine_with_fixed_tip(0);
    let candidates = engine.generate(&series, 10);

    let optimal = candidates
        .iter()
        .find(|c| c.kind == RecommendationType::OptimalTime)
        .expect("act-now candidate missing");
    assert_eq!(optimal.priority, Priority::High);
    let action = optimal.action_data.as_ref().unwrap();
    assert_eq!(action.savings_percent, Some(11.0));
}

#[test]
fn test_medium_price_emits_later_window() {
    // Current hour is medium; the cheapest future hours are 18-20.
    let series = flat_series_with(0.20, &[(18, 0.10), (19, 0.12), (20, 0.11)]);

    let engine = engine_with_fixed_tip(0);
    let candidates = engine.generate(&series, 10);

    let optimal = candidates
        .iter()
        .find(|c| c.kind == RecommendationType::OptimalTime)
        .expect("later candidate missing");
    assert_eq!(optimal.priority, Priority::Medium);
    let window = optimal
        .action_data
        .as_ref()
        .and_then(|a| a.time_window.as_ref())
        .expect("later candidate has no window");
    assert_eq!(window.start, "18:00");
    assert_eq!(window.end, "20:00");
}

#[test]
fn test_avoid_usage_requires_high_classification() {
    // Flat series: every hour classifies medium, so no avoid candidate.
    let series = flat_series_with(0.15, &[]);
    let engine = engine_with_fixed_tip(0);
    let candidates = engine.generate(&series, 10);

    assert!(candidates
        .iter()
        .all(|c| c.kind != RecommendationType::AvoidUsage));
}

#[test]
fn test_avoid_usage_window_spans_past_next_expensive_hour() {
    // Mean 0.1025; 0.12 sits in the high band (between 1.1x and 1.3x).
    let series = flat_series_with(0.10, &[(10, 0.12), (15, 0.12), (16, 0.12)]);

    let analysis = analyze_series(&series, 10);
    assert_eq!(analysis.classification, PriceLevel::High);
    assert_eq!(analysis.next_avoid_hours, vec![15, 16]);

    let engine = engine_with_fixed_tip(0);
    let candidates = engine.generate(&series, 10);

    let avoid = candidates
        .iter()
        .find(|c| c.kind == RecommendationType::AvoidUsage)
        .expect("avoid candidate missing");
    assert_eq!(avoid.priority, Priority::High);
    let window = avoid
        .action_data
        .as_ref()
        .and_then(|a| a.time_window.as_ref())
        .unwrap();
    assert_eq!(window.start, "10:00");
    assert_eq!(window.end, "16:00");
}

#[test]
fn test_schedule_device_uses_fixed_window_and_savings() {
    let series = flat_series_with(0.20, &[(18, 0.10)]);

    let engine = engine_with_fixed_tip(0);
    let candidates = engine.generate(&series, 10);

    let schedule = candidates
        .iter()
        .find(|c| c.kind == RecommendationType::ScheduleDevice)
        .expect("schedule candidate missing");
    assert_eq!(schedule.priority, Priority::Medium);
    let action = schedule.action_data.as_ref().unwrap();
    assert_eq!(action.savings_percent, Some(60.0));
    assert_eq!(action.device_type.as_deref(), Some("washing machine"));
    let window = action.time_window.as_ref().unwrap();
    assert_eq!(window.start, "18:00");
    assert_eq!(window.end, "22:00");
}

#[test]
fn test_schedule_window_wraps_past_midnight() {
    let series = flat_series_with(0.20, &[(23, 0.10)]);

    let engine = engine_with_fixed_tip(0);
    let candidates = engine.generate(&series, 22);

    let schedule = candidates
        .iter()
        .find(|c| c.kind == RecommendationType::ScheduleDevice)
        .unwrap();
    let window = schedule
        .action_data
        .as_ref()
        .and_then(|a| a.time_window.as_ref())
        .unwrap();
    assert_eq!(window.start, "23:00");
    assert_eq!(window.end, "03:00");
}

#[test]
fn test_emission_order_is_fixed() {
    let series = flat_series_with(0.20, &[(18, 0.10)]);

    let engine = engine_with_fixed_tip(0);
    let kinds: Vec<RecommendationType> = engine
        .generate(&series, 10)
        .iter()
        .map(|c| c.kind)
        .collect();

    assert_eq!(
        kinds,
        vec![
            RecommendationType::OptimalTime,
            RecommendationType::ScheduleDevice,
            RecommendationType::TipOfDay,
        ]
    );
}

#[test]
fn test_analysis_picks_three_cheapest_future_hours() {
    let series = flat_series_with(
        0.20,
        &[(12, 0.11), (15, 0.09), (18, 0.10), (21, 0.12), (5, 0.01)],
    );

    let analysis = analyze_series(&series, 10);

    // Hour 5 is in the past and must be ignored.
    assert_eq!(analysis.next_optimal_hours, vec![15, 18, 12]);
    assert_eq!(analysis.nearest_optimal_hour(), Some(12));
}

#[test]
fn test_missing_current_hour_counts_as_zero() {
    let series: Vec<_> = flat_series_with(0.20, &[])
        .into_iter()
        .filter(|p| p.hour != 10)
        .collect();

    let analysis = analyze_series(&series, 10);

    assert_eq!(analysis.current_price, 0.0);
    assert_eq!(analysis.savings_opportunity, 0.0);
    assert_eq!(analysis.classification, PriceLevel::Low);
}
