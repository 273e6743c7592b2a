//! Recommendation candidate payloads produced by the engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Kinds of recommendations surfaced to the user.
///
/// `PriceAlert` is reserved for externally raised alerts; the engine
/// itself never emits it, but the config's enabled-type set covers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    OptimalTime,
    AvoidUsage,
    ScheduleDevice,
    TipOfDay,
    PriceAlert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Display window in `HH:00` clock strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_window: Option<TimeWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
}

/// An ephemeral, not-yet-persisted suggestion. Carries no identity until
/// the notification store assigns one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationCandidate {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_data: Option<ActionData>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl RecommendationCandidate {
    pub fn new(kind: RecommendationType, title: String, message: String, priority: Priority) -> Self {
        Self {
            kind,
            title,
            message,
            priority,
            action_data: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_action_data(mut self, action_data: ActionData) -> Self {
        self.action_data = Some(action_data);
        self
    }

    pub fn with_metadata(mut self, key: &str, value: Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// The hour this candidate was generated for, if recorded in metadata.
    /// Deduplication keys on `(type, current hour)`.
    pub fn current_hour(&self) -> Option<u8> {
        self.metadata
            .get("currentHour")
            .and_then(Value::as_u64)
            .map(|h| (h % 24) as u8)
    }
}
