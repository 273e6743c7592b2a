//! Notification ledger: creation, deduplication, expiry, read-state,
//! and persistence of generated recommendations.

use chrono::{DateTime, Duration, Timelike, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::models::notification::{
    Notification, NotificationConfig, NotificationConfigUpdate, QuietHours,
};
use crate::models::price::PricePoint;
use crate::models::recommendation::RecommendationCandidate;
use crate::recommendations::engine::RecommendationEngine;
use crate::store::persistence::KeyValueStore;

/// Persistence key for the serialized ledger (JSON array).
pub const LEDGER_KEY: &str = "voltio:notifications";
/// Persistence key for the serialized config (JSON object).
pub const CONFIG_KEY: &str = "voltio:notification_config";
/// Persistence key for the last-generation instant (RFC 3339 string).
pub const LAST_GENERATED_KEY: &str = "voltio:last_generated";

struct LedgerState {
    notifications: Vec<Notification>,
    config: NotificationConfig,
    last_generated: Option<DateTime<Utc>>,
}

/// Owns the notification ledger and its lifecycle.
///
/// Every mutating operation is a full read-modify-persist cycle; the
/// in-memory ledger stays authoritative for the session even when the
/// persistence collaborator is unavailable. Storage faults are logged
/// and swallowed; no operation here fails its caller.
pub struct NotificationStore {
    state: RwLock<LedgerState>,
    persistence: Arc<dyn KeyValueStore>,
    engine: RecommendationEngine,
    loading: AtomicBool,
    generating: AtomicBool,
}

impl NotificationStore {
    pub fn new(persistence: Arc<dyn KeyValueStore>) -> Self {
        Self::with_engine(persistence, RecommendationEngine::new())
    }

    pub fn with_engine(persistence: Arc<dyn KeyValueStore>, engine: RecommendationEngine) -> Self {
        Self {
            state: RwLock::new(LedgerState {
                notifications: Vec::new(),
                config: NotificationConfig::default(),
                last_generated: None,
            }),
            persistence,
            engine,
            loading: AtomicBool::new(false),
            generating: AtomicBool::new(false),
        }
    }

    /// Load the persisted ledger, config, and last-generation instant.
    ///
    /// Malformed payloads are discarded with a warning and replaced by
    /// the defaults; a missing or failing backend leaves the store
    /// empty. Never fails.
    pub async fn load(&self) {
        self.loading.store(true, Ordering::SeqCst);

        let notifications = match self.persistence.get(LEDGER_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Notification>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(error = %e, "discarding malformed notification ledger");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read notification ledger");
                Vec::new()
            }
        };

        let config = match self.persistence.get(CONFIG_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<NotificationConfig>(&raw) {
                Ok(config) => config,
                Err(e) => {
                    warn!(error = %e, "discarding malformed notification config");
                    NotificationConfig::default()
                }
            },
            Ok(None) => NotificationConfig::default(),
            Err(e) => {
                warn!(error = %e, "failed to read notification config");
                NotificationConfig::default()
            }
        };

        let last_generated = match self.persistence.get(LAST_GENERATED_KEY).await {
            Ok(Some(raw)) => match DateTime::parse_from_rfc3339(&raw) {
                Ok(instant) => Some(instant.with_timezone(&Utc)),
                Err(e) => {
                    warn!(error = %e, "discarding malformed last-generated timestamp");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "failed to read last-generated timestamp");
                None
            }
        };

        {
            let mut state = self.state.write().await;
            state.notifications = notifications;
            state.config = config;
            state.last_generated = last_generated;
            Self::sweep_expired(&mut state.notifications, Utc::now());
        }

        self.loading.store(false, Ordering::SeqCst);
    }

    /// Generate recommendations for the series and fold the survivors
    /// into the ledger.
    ///
    /// A no-op during quiet hours, on an empty series, or while another
    /// logical invocation is in flight. Candidates of disabled types
    /// and candidates duplicating a recent unread `(type, hour)` pair
    /// are dropped; the rest are assigned identity, prepended, and the
    /// ledger is truncated to the configured maximum.
    pub async fn generate_recommendations(&self, series: &[PricePoint], current_hour: u8) {
        if series.is_empty() {
            debug!("no price series available, skipping generation");
            return;
        }
        if self.is_in_quiet_hours().await {
            debug!("inside quiet hours, skipping generation");
            return;
        }
        if self.generating.swap(true, Ordering::SeqCst) {
            debug!("generation already in flight, skipping");
            return;
        }

        let candidates = self.engine.generate(series, current_hour);
        let now = Utc::now();

        {
            let mut state = self.state.write().await;
            Self::sweep_expired(&mut state.notifications, now);

            let enabled_types = state.config.enabled_types.clone();
            let auto_expire_hours = state.config.auto_expire_hours;
            let max_notifications = state.config.max_notifications;

            let fresh: Vec<Notification> = candidates
                .into_iter()
                .filter(|c| enabled_types.contains(&c.kind))
                .filter(|c| !Self::is_duplicate(&state.notifications, c, now))
                .map(|c| Notification::from_candidate(c, now, auto_expire_hours))
                .collect();

            if !fresh.is_empty() {
                info!(
                    count = fresh.len(),
                    current_hour, "adding generated recommendations to the ledger"
                );
                let mut merged = fresh;
                merged.append(&mut state.notifications);
                merged.truncate(max_notifications);
                state.notifications = merged;
            }
            state.last_generated = Some(now);
            self.persist(&state).await;
        }

        self.generating.store(false, Ordering::SeqCst);
    }

    /// An unread, unexpired entry with the same `(type, hour)` pair
    /// created within the last hour suppresses the candidate.
    fn is_duplicate(
        ledger: &[Notification],
        candidate: &RecommendationCandidate,
        now: DateTime<Utc>,
    ) -> bool {
        let cutoff = now - Duration::hours(1);
        ledger.iter().any(|n| {
            !n.is_read
                && !n.is_expired(now)
                && n.created_at > cutoff
                && n.candidate.kind == candidate.kind
                && n.candidate.current_hour() == candidate.current_hour()
        })
    }

    /// Flip one notification to read. Unknown ids are ignored.
    pub async fn mark_as_read(&self, id: &str) {
        let mut state = self.state.write().await;
        let Some(entry) = state.notifications.iter_mut().find(|n| n.id == id) else {
            return;
        };
        if entry.is_read {
            return;
        }
        entry.is_read = true;
        self.persist(&state).await;
    }

    pub async fn mark_all_as_read(&self) {
        let mut state = self.state.write().await;
        for entry in state.notifications.iter_mut() {
            entry.is_read = true;
        }
        self.persist(&state).await;
    }

    /// Remove one notification. Unknown ids are ignored.
    pub async fn remove_notification(&self, id: &str) {
        let mut state = self.state.write().await;
        let before = state.notifications.len();
        state.notifications.retain(|n| n.id != id);
        if state.notifications.len() == before {
            return;
        }
        self.persist(&state).await;
    }

    pub async fn clear_all_notifications(&self) {
        let mut state = self.state.write().await;
        state.notifications.clear();
        self.persist(&state).await;
    }

    /// Merge a partial config update and persist it. Existing
    /// notifications keep the expiry they were created with. Returns
    /// the merged config so callers can reschedule the regeneration
    /// timer when the interval changed.
    pub async fn update_config(&self, update: NotificationConfigUpdate) -> NotificationConfig {
        let mut state = self.state.write().await;
        state.config.apply(update);
        self.persist(&state).await;
        state.config.clone()
    }

    /// Whether the current wall-clock minute falls inside the
    /// configured quiet-hours window.
    pub async fn is_in_quiet_hours(&self) -> bool {
        let window = {
            let state = self.state.read().await;
            state.config.quiet_hours.clone()
        };
        let Some(window) = window else {
            return false;
        };
        let now = Utc::now();
        quiet_window_contains(&window, now.hour() * 60 + now.minute())
    }

    /// Ledger snapshot, newest first, with expired entries swept.
    pub async fn notifications(&self) -> Vec<Notification> {
        let mut state = self.state.write().await;
        Self::sweep_expired(&mut state.notifications, Utc::now());
        state.notifications.clone()
    }

    pub async fn unread_count(&self) -> usize {
        let mut state = self.state.write().await;
        Self::sweep_expired(&mut state.notifications, Utc::now());
        state.notifications.iter().filter(|n| !n.is_read).count()
    }

    pub async fn config(&self) -> NotificationConfig {
        self.state.read().await.config.clone()
    }

    pub async fn last_generated(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.last_generated
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    fn sweep_expired(notifications: &mut Vec<Notification>, now: DateTime<Utc>) {
        let before = notifications.len();
        notifications.retain(|n| !n.is_expired(now));
        if notifications.len() < before {
            debug!(
                expired = before - notifications.len(),
                "swept expired notifications"
            );
        }
    }

    /// Write the full snapshot. Failures are logged and swallowed; the
    /// in-memory state remains authoritative for the session.
    async fn persist(&self, state: &LedgerState) {
        match serde_json::to_string(&state.notifications) {
            Ok(raw) => {
                if let Err(e) = self.persistence.set(LEDGER_KEY, &raw).await {
                    warn!(error = %e, "failed to persist notification ledger");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize notification ledger"),
        }

        match serde_json::to_string(&state.config) {
            Ok(raw) => {
                if let Err(e) = self.persistence.set(CONFIG_KEY, &raw).await {
                    warn!(error = %e, "failed to persist notification config");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize notification config"),
        }

        if let Some(instant) = state.last_generated {
            if let Err(e) = self
                .persistence
                .set(LAST_GENERATED_KEY, &instant.to_rfc3339())
                .await
            {
                warn!(error = %e, "failed to persist last-generated timestamp");
            }
        }
    }
}

/// Inclusive minute-of-day containment with midnight wraparound:
/// `[start, end]` when `start <= end`, otherwise
/// `[start, 1440) ∪ [0, end]`.
///
/// Windows are expected to be well-formed `HH:MM`; an unparseable
/// window is ignored rather than validated.
pub fn quiet_window_contains(window: &QuietHours, minute_of_day: u32) -> bool {
    let (Some(start), Some(end)) = (
        parse_minute_of_day(&window.start),
        parse_minute_of_day(&window.end),
    ) else {
        debug!(
            start = %window.start,
            end = %window.end,
            "unparseable quiet-hours window, ignoring"
        );
        return false;
    };

    if start <= end {
        minute_of_day >= start && minute_of_day <= end
    } else {
        minute_of_day >= start || minute_of_day <= end
    }
}

fn parse_minute_of_day(value: &str) -> Option<u32> {
    let (hours, minutes) = value.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}
