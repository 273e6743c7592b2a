use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One hour's settled or forecast price for a single day.
///
/// Produced by the external price-data collaborator and immutable from
/// then on. Hours need not arrive contiguous or sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub hour: u8,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl PricePoint {
    pub fn new(hour: u8, price: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            hour,
            price,
            timestamp,
        }
    }
}

/// Relative price level, derived from a reference series and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl PriceLevel {
    /// Position of the level within the low..very_high ordering.
    pub fn band_index(self) -> u8 {
        match self {
            PriceLevel::Low => 0,
            PriceLevel::Medium => 1,
            PriceLevel::High => 2,
            PriceLevel::VeryHigh => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceLevel::Low => "low",
            PriceLevel::Medium => "medium",
            PriceLevel::High => "high",
            PriceLevel::VeryHigh => "very high",
        }
    }
}
