//! Shared data models spanning the engine layers.

pub mod notification;
pub mod price;
pub mod recommendation;

pub use notification::{Notification, NotificationConfig, NotificationConfigUpdate, QuietHours};
pub use price::{PriceLevel, PricePoint};
pub use recommendation::{
    ActionData, Priority, RecommendationCandidate, RecommendationType, TimeWindow,
};
