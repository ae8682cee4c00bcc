//! # Collaborator Traits
//!
//! The three external sources the derivation core consumes. Production
//! implementations live in [`crate::services`]; tests substitute mocks.
//!
//! Calls here are plain request/response. The "trigger a fetch and let the
//! result arrive later" behaviour is layered on top by [`crate::app`], which
//! spawns the call and forwards the result as an event.

use async_trait::async_trait;
use shared::dto::market::{Coin, MarketSummary};
use shared::dto::portfolio::PortfolioEntry;

use crate::core::error::Result;

/// Publishes the full list of tradable coins.
#[async_trait]
pub trait CoinCatalogSource: Send + Sync {
    /// Fetch the latest catalog snapshot.
    async fn fetch_coins(&self) -> Result<Vec<Coin>>;
}

/// Publishes the global market summary.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch the latest summary. `Ok(None)` when the API answered without data.
    async fn fetch_market_summary(&self) -> Result<Option<MarketSummary>>;
}

/// Owns the saved portfolio entries.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Load the current entry set.
    async fn load_entries(&self) -> Result<Vec<PortfolioEntry>>;

    /// Save `amount` of `coin_id`, or remove the entry when `amount` is not
    /// positive. Returns the entry set after the change.
    async fn upsert(&self, coin_id: &str, amount: f64) -> Result<Vec<PortfolioEntry>>;
}
