//! Interval-driven regeneration of recommendations.

use chrono::Timelike;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::services::price_data::PriceDataProvider;
use crate::store::notification_store::NotificationStore;

/// Periodically pulls today's series from the price-data collaborator
/// and funnels it through the store's `generate_recommendations`.
///
/// Owns a single cancellable task; rescheduling cancels the previous
/// task first, so timers never stack across config changes or repeated
/// activation cycles.
pub struct RegenerationScheduler {
    store: Arc<NotificationStore>,
    provider: Arc<dyn PriceDataProvider>,
    handle: Arc<RwLock<Option<JoinHandle<()>>>>,
}

impl RegenerationScheduler {
    pub fn new(store: Arc<NotificationStore>, provider: Arc<dyn PriceDataProvider>) -> Self {
        Self {
            store,
            provider,
            handle: Arc::new(RwLock::new(None)),
        }
    }

    /// Start ticking every `interval_minutes`, replacing any running
    /// task. The first generation fires after one full interval; an
    /// immediate pass is the caller's manual trigger.
    pub async fn start(&self, interval_minutes: u32) {
        self.stop().await;

        let store = self.store.clone();
        let provider = self.provider.clone();
        let minutes = interval_minutes.max(1);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(u64::from(minutes) * 60));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick of a tokio interval completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match provider.today().await {
                    Ok(series) => {
                        let current_hour = chrono::Utc::now().hour() as u8;
                        store.generate_recommendations(&series, current_hour).await;
                    }
                    Err(e) => {
                        error!(error = %e, "scheduler failed to fetch today's prices");
                    }
                }
            }
        });

        *self.handle.write().await = Some(handle);
        info!(interval_minutes = minutes, "regeneration scheduler started");
    }

    /// Cancel and restart with a new interval. Interval config changes
    /// route here instead of spawning a second timer.
    pub async fn set_interval(&self, interval_minutes: u32) {
        self.start(interval_minutes).await;
    }

    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(task) = handle.take() {
            task.abort();
            debug!("regeneration scheduler stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}
