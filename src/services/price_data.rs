//! Price data boundary; the core never fetches prices itself.

use async_trait::async_trait;

use crate::models::price::PricePoint;

/// Supplies the day's hourly series from an external market-data
/// integration.
#[async_trait]
pub trait PriceDataProvider: Send + Sync {
    /// Today's series, one point per published hour.
    async fn today(&self)
        -> Result<Vec<PricePoint>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Stands in before a real market-data integration is wired up.
pub struct PlaceholderPriceDataProvider;

#[async_trait]
impl PriceDataProvider for PlaceholderPriceDataProvider {
    async fn today(
        &self,
    ) -> Result<Vec<PricePoint>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Vec::new())
    }
}
