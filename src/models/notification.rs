//! Persisted notification entities and the user-mutable store config.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::recommendation::{RecommendationCandidate, RecommendationType};

/// A recommendation that has been given identity and a lifecycle by the
/// notification store. Mutated only by read-marking; destroyed on
/// removal, clear-all, or expiry sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(flatten)]
    pub candidate: RecommendationCandidate,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    /// Promote a candidate into a ledger entry. The expiry horizon is
    /// fixed at creation time; later config changes do not rewrite it.
    pub fn from_candidate(
        candidate: RecommendationCandidate,
        created_at: DateTime<Utc>,
        auto_expire_hours: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            candidate,
            created_at,
            is_read: false,
            expires_at: created_at + Duration::hours(i64::from(auto_expire_hours)),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Daily time-of-day window during which no notifications are generated.
/// `start`/`end` are `HH:MM` strings; the window may wrap past midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuietHours {
    pub start: String,
    pub end: String,
}

/// User-mutable store configuration. Persisted; survives restarts via
/// the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub regeneration_interval_minutes: u32,
    pub max_notifications: usize,
    pub enabled_types: HashSet<RecommendationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet_hours: Option<QuietHours>,
    pub auto_expire_hours: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            regeneration_interval_minutes: 60,
            max_notifications: 10,
            enabled_types: HashSet::from([
                RecommendationType::OptimalTime,
                RecommendationType::AvoidUsage,
                RecommendationType::ScheduleDevice,
                RecommendationType::TipOfDay,
                RecommendationType::PriceAlert,
            ]),
            quiet_hours: None,
            auto_expire_hours: 24,
        }
    }
}

impl NotificationConfig {
    /// Merge a partial update. Fields left `None` keep their value; the
    /// quiet-hours window can be set but not cleared through a merge.
    pub fn apply(&mut self, update: NotificationConfigUpdate) {
        if let Some(minutes) = update.regeneration_interval_minutes {
            self.regeneration_interval_minutes = minutes;
        }
        if let Some(max) = update.max_notifications {
            self.max_notifications = max;
        }
        if let Some(types) = update.enabled_types {
            self.enabled_types = types;
        }
        if let Some(window) = update.quiet_hours {
            self.quiet_hours = Some(window);
        }
        if let Some(hours) = update.auto_expire_hours {
            self.auto_expire_hours = hours;
        }
    }
}

/// Partial counterpart of [`NotificationConfig`] for merge updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationConfigUpdate {
    pub regeneration_interval_minutes: Option<u32>,
    pub max_notifications: Option<usize>,
    pub enabled_types: Option<HashSet<RecommendationType>>,
    pub quiet_hours: Option<QuietHours>,
    pub auto_expire_hours: Option<u32>,
}
