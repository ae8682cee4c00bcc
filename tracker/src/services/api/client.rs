//! # API Client
//!
//! HTTP client for the CoinGecko-compatible market data API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::dto::market::{Coin, MarketSummary};

use crate::config::AppConfig;
use crate::core::error::Result;
use crate::core::service::{CoinCatalogSource, MarketDataSource};

/// HTTP client for the market data API.
///
/// One client serves both the coin catalog and the market summary, sharing a
/// connection pool.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    per_page: u32,
}

impl ApiClient {
    /// Create a client for `base_url` (no trailing slash needed).
    ///
    /// Requests give up after `timeout_secs`; the catalog asks for
    /// `per_page` coins.
    pub fn new(base_url: impl Into<String>, timeout_secs: u64, per_page: u32) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("tracker/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "HTTP client builder failed - using defaults");
                Client::new()
            });

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            per_page,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.api_url, config.http_timeout_secs, config.coins_per_page)
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn per_page(&self) -> u32 {
        self.per_page
    }
}

#[async_trait]
impl CoinCatalogSource for ApiClient {
    async fn fetch_coins(&self) -> Result<Vec<Coin>> {
        crate::services::api::market::get_coins(self).await
    }
}

#[async_trait]
impl MarketDataSource for ApiClient {
    async fn fetch_market_summary(&self) -> Result<Option<MarketSummary>> {
        crate::services::api::market::get_global_market(self).await
    }
}
