//! # Market Data Endpoints
//!
//! `/coins/markets` for the catalog and `/global` for the market summary.

use serde::de::DeserializeOwned;
use shared::dto::market::{Coin, GlobalResponse, MarketSummary};

use super::client::ApiClient;
use crate::core::error::{AppError, Result};

/// Catalog URL: USD prices by market cap, with 7d sparkline and 24h change.
pub(crate) fn markets_url(client: &ApiClient) -> String {
    format!(
        "{}/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={}&page=1&sparkline=true&price_change_percentage=24h",
        client.base_url(),
        client.per_page()
    )
}

pub(crate) fn global_url(client: &ApiClient) -> String {
    format!("{}/global", client.base_url())
}

/// Get the coin catalog.
#[tracing::instrument(skip(client), fields(per_page = client.per_page()))]
pub async fn get_coins(client: &ApiClient) -> Result<Vec<Coin>> {
    let coins: Vec<Coin> = get_json(client, &markets_url(client)).await?;
    tracing::debug!(count = coins.len(), "Coins fetched successfully");
    Ok(coins)
}

/// Get the global market summary. `None` when the payload has no `data`.
#[tracing::instrument(skip(client))]
pub async fn get_global_market(client: &ApiClient) -> Result<Option<MarketSummary>> {
    let response: GlobalResponse = get_json(client, &global_url(client)).await?;
    if response.data.is_none() {
        tracing::warn!("Global market response carried no data");
    }
    Ok(response.data)
}

async fn get_json<T: DeserializeOwned>(client: &ApiClient, url: &str) -> Result<T> {
    let start = std::time::Instant::now();
    tracing::debug!(url = %url, "Sending request");

    let response = client.client.get(url).send().await.map_err(|e| {
        tracing::error!(error = %e, url = %url, "Network error");
        AppError::Api(format!("Network error: {}", e))
    })?;

    let status = response.status();
    let duration = start.elapsed();

    if !status.is_success() {
        tracing::warn!(
            status = status.as_u16(),
            duration_ms = duration.as_millis(),
            url = %url,
            "Request failed"
        );
        return Err(AppError::Api(format!("HTTP {} from {}", status, url)));
    }

    let body = response.text().await?;
    let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
        tracing::error!(error = %e, url = %url, "Response parse error");
        AppError::Parse(format!("Failed to parse response from {}: {}", url, e))
    })?;

    tracing::debug!(
        duration_ms = duration.as_millis(),
        bytes = body.len(),
        "Response received"
    );
    Ok(parsed)
}
