//! # Market Data Tasks
//!
//! Catalog and market summary fetches.

use std::sync::Arc;

use async_channel::Sender;
use tokio::spawn;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::app::events::{AppEvent, DataSource};
use crate::core::service::{CoinCatalogSource, MarketDataSource};

/// Fetch the coin catalog and publish it.
///
/// On failure the error is logged and reported as [`AppEvent::FetchFailed`];
/// the previous catalog stays in place.
pub(crate) fn fetch_coins(
    catalog: Arc<dyn CoinCatalogSource>,
    event_tx: Sender<AppEvent>,
) -> JoinHandle<()> {
    spawn(async move {
        let start = std::time::Instant::now();
        let result = catalog.fetch_coins().await;
        let duration = start.elapsed();

        let event = match result {
            Ok(coins) => {
                debug!(
                    count = coins.len(),
                    duration_ms = duration.as_millis(),
                    "Coin catalog fetched"
                );
                AppEvent::CoinsPublished(coins)
            }
            Err(e) => {
                error!(
                    error = %e,
                    duration_ms = duration.as_millis(),
                    "Failed to fetch coin catalog - keeping last known coins"
                );
                AppEvent::FetchFailed {
                    source: DataSource::Catalog,
                    error: e.to_string(),
                }
            }
        };
        let _ = event_tx.send(event).await;
    })
}

/// Fetch the global market summary and publish it.
pub(crate) fn fetch_market_summary(
    market: Arc<dyn MarketDataSource>,
    event_tx: Sender<AppEvent>,
) -> JoinHandle<()> {
    spawn(async move {
        let start = std::time::Instant::now();
        let result = market.fetch_market_summary().await;
        let duration = start.elapsed();

        let event = match result {
            Ok(summary) => {
                debug!(
                    has_data = summary.is_some(),
                    duration_ms = duration.as_millis(),
                    "Market summary fetched"
                );
                AppEvent::MarketSummaryPublished(summary)
            }
            Err(e) => {
                error!(
                    error = %e,
                    duration_ms = duration.as_millis(),
                    "Failed to fetch market summary - keeping last known summary"
                );
                AppEvent::FetchFailed {
                    source: DataSource::Market,
                    error: e.to_string(),
                }
            }
        };
        let _ = event_tx.send(event).await;
    })
}
