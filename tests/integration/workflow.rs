//! End-to-end flow: series in, deduplicated persisted ledger out.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use voltio::models::price::PricePoint;
use voltio::models::recommendation::RecommendationType;
use voltio::recommendations::engine::RecommendationEngine;
use voltio::recommendations::tips::FixedTipPicker;
use voltio::store::notification_store::NotificationStore;
use voltio::store::persistence::MemoryStore;

/// A realistic PVPC-shaped day: cheap overnight, morning and evening
/// peaks, a soft midday dip.
fn pvpc_day() -> Vec<PricePoint> {
    let prices = [
        0.08, 0.07, 0.06, 0.06, 0.07, 0.09, 0.12, 0.16, 0.19, 0.18, 0.15, 0.13, 0.12, 0.11, 0.12,
        0.14, 0.17, 0.20, 0.22, 0.23, 0.21, 0.18, 0.14, 0.10,
    ];
    prices
        .iter()
        .enumerate()
        .map(|(hour, &price)| {
            PricePoint::new(
                hour as u8,
                price,
                Utc.with_ymd_and_hms(2025, 6, 12, hour as u32, 0, 0).unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_full_generation_cycle_survives_restart() {
    let persistence = Arc::new(MemoryStore::new());

    let store = NotificationStore::with_engine(
        persistence.clone(),
        RecommendationEngine::with_tip_picker(Box::new(FixedTipPicker(1))),
    );
    store.load().await;
    assert!(store.notifications().await.is_empty());

    // Morning peak with cheaper hours later in the day.
    store.generate_recommendations(&pvpc_day(), 8).await;

    let notifications = store.notifications().await;
    assert!(!notifications.is_empty());
    assert_eq!(store.unread_count().await, notifications.len());
    assert!(notifications
        .iter()
        .any(|n| n.candidate.kind == RecommendationType::TipOfDay));

    // Newest first: creation order within one pass is preserved, and a
    // later pass for another hour lands in front.
    store.generate_recommendations(&pvpc_day(), 13).await;
    let notifications = store.notifications().await;
    assert_eq!(notifications[0].candidate.current_hour(), Some(13));

    // A second session over the same backend sees the same ledger.
    let resumed = NotificationStore::new(persistence);
    resumed.load().await;
    let reloaded = resumed.notifications().await;
    assert_eq!(reloaded.len(), notifications.len());
    assert_eq!(reloaded[0].id, notifications[0].id);
    assert!(resumed.last_generated().await.is_some());
}

#[tokio::test]
async fn test_generation_is_idempotent_within_the_hour() {
    let persistence = Arc::new(MemoryStore::new());
    let store = NotificationStore::with_engine(
        persistence,
        RecommendationEngine::with_tip_picker(Box::new(FixedTipPicker(0))),
    );

    store.generate_recommendations(&pvpc_day(), 8).await;
    let first = store.notifications().await.len();

    for _ in 0..5 {
        store.generate_recommendations(&pvpc_day(), 8).await;
    }

    assert_eq!(store.notifications().await.len(), first);
}
