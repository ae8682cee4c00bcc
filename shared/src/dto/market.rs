//! # Market Data DTOs
//!
//! Coin snapshots from the catalog endpoint and the global market summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::{as_percent_string, format_with_abbreviations};

/// A single tradable coin as published by the coin catalog.
///
/// Snapshots are immutable: joining a coin with a portfolio entry goes through
/// [`Coin::with_holdings`], which returns a new value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub current_price: f64,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub fully_diluted_valuation: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
    #[serde(default)]
    pub price_change_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub market_cap_change_24h: Option<f64>,
    #[serde(default)]
    pub market_cap_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub circulating_supply: Option<f64>,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub max_supply: Option<f64>,
    #[serde(default)]
    pub ath: Option<f64>,
    #[serde(default)]
    pub ath_change_percentage: Option<f64>,
    #[serde(default)]
    pub ath_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub atl: Option<f64>,
    #[serde(default)]
    pub atl_change_percentage: Option<f64>,
    #[serde(default)]
    pub atl_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparkline_in_7d: Option<Sparkline>,
    /// Held amount. Never sent by the API; set only by the portfolio join.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_holdings: Option<f64>,
}

/// Seven day price sparkline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Vec<f64>,
}

impl Coin {
    /// Build a coin with only the fields the derivation core reads.
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        rank: u32,
        current_price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
            image: None,
            current_price,
            market_cap: None,
            market_cap_rank: Some(rank),
            fully_diluted_valuation: None,
            total_volume: None,
            high_24h: None,
            low_24h: None,
            price_change_24h: None,
            price_change_percentage_24h: None,
            market_cap_change_24h: None,
            market_cap_change_percentage_24h: None,
            circulating_supply: None,
            total_supply: None,
            max_supply: None,
            ath: None,
            ath_change_percentage: None,
            ath_date: None,
            atl: None,
            atl_change_percentage: None,
            atl_date: None,
            last_updated: None,
            sparkline_in_7d: None,
            current_holdings: None,
        }
    }

    /// Builder-style setter for the 24h percentage change.
    pub fn with_change_24h(mut self, percentage: f64) -> Self {
        self.price_change_percentage_24h = Some(percentage);
        self
    }

    /// Return a copy of this coin carrying `amount` as its holdings.
    pub fn with_holdings(&self, amount: f64) -> Self {
        Self {
            current_holdings: Some(amount),
            ..self.clone()
        }
    }

    /// Market cap rank; an unranked coin reads as 0.
    pub fn rank(&self) -> u32 {
        self.market_cap_rank.unwrap_or(0)
    }

    /// `current_price * holdings`, or 0 when the coin is not held.
    pub fn current_holdings_value(&self) -> f64 {
        self.current_holdings.unwrap_or(0.0) * self.current_price
    }
}

/// Envelope of the `/global` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalResponse {
    pub data: Option<MarketSummary>,
}

/// Global market summary. Replaced wholesale on each fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MarketSummary {
    /// Total market cap keyed by quote currency (`usd`, `eur`, ...)
    #[serde(default)]
    pub total_market_cap: HashMap<String, f64>,
    /// 24h volume keyed by quote currency
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    /// Market cap share keyed by coin symbol (`btc`, `eth`, ...)
    #[serde(default)]
    pub market_cap_percentage: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap_change_percentage_24h_usd: f64,
}

impl MarketSummary {
    /// Total USD market cap, e.g. `$2.51Tr`. Empty when the API sent no `usd` key.
    pub fn market_cap(&self) -> String {
        self.total_market_cap
            .get("usd")
            .map(|cap| format!("${}", format_with_abbreviations(*cap)))
            .unwrap_or_default()
    }

    /// 24h USD volume, e.g. `$98.00Bn`.
    pub fn volume(&self) -> String {
        self.total_volume
            .get("usd")
            .map(|volume| format!("${}", format_with_abbreviations(*volume)))
            .unwrap_or_default()
    }

    /// Bitcoin share of the total market cap, e.g. `52.31%`.
    pub fn btc_dominance(&self) -> String {
        self.market_cap_percentage
            .get("btc")
            .map(|share| as_percent_string(*share))
            .unwrap_or_default()
    }

    pub fn market_cap_change_24h(&self) -> f64 {
        self.market_cap_change_percentage_24h_usd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holdings_value_defaults_to_zero() {
        let coin = Coin::new("btc", "btc", "Bitcoin", 1, 100.0);
        assert_eq!(coin.current_holdings_value(), 0.0);
        assert_eq!(coin.with_holdings(2.0).current_holdings_value(), 200.0);
    }

    #[test]
    fn test_with_holdings_leaves_source_untouched() {
        let coin = Coin::new("eth", "eth", "Ethereum", 2, 10.0);
        let held = coin.with_holdings(3.0);
        assert_eq!(coin.current_holdings, None);
        assert_eq!(held.current_holdings, Some(3.0));
        assert_eq!(held.id, coin.id);
    }

    #[test]
    fn test_unranked_coin_reads_as_zero() {
        let mut coin = Coin::new("x", "x", "X", 7, 1.0);
        coin.market_cap_rank = None;
        assert_eq!(coin.rank(), 0);
    }

    #[test]
    fn test_coin_deserializes_from_markets_payload() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 64123.5,
            "market_cap": 1260000000000,
            "market_cap_rank": 1,
            "total_volume": 31000000000,
            "high_24h": 65000,
            "low_24h": 63000,
            "price_change_24h": -512.3,
            "price_change_percentage_24h": -0.79,
            "max_supply": 21000000,
            "ath_date": "2024-03-14T07:10:36.635Z",
            "last_updated": "2024-05-01T12:00:00.000Z",
            "roi": null,
            "sparkline_in_7d": { "price": [1.0, 2.0, 3.0] }
        }"#;

        let coin: Coin = serde_json::from_str(json).unwrap();
        assert_eq!(coin.id, "bitcoin");
        assert_eq!(coin.rank(), 1);
        assert_eq!(coin.price_change_percentage_24h, Some(-0.79));
        assert_eq!(coin.current_holdings, None);
        assert_eq!(coin.sparkline_in_7d.map(|s| s.price.len()), Some(3));
    }

    #[test]
    fn test_coin_tolerates_null_market_fields() {
        let json = r#"{
            "id": "newcoin",
            "symbol": "new",
            "name": "New Coin",
            "current_price": 0.01,
            "market_cap_rank": null,
            "price_change_percentage_24h": null
        }"#;

        let coin: Coin = serde_json::from_str(json).unwrap();
        assert_eq!(coin.rank(), 0);
        assert_eq!(coin.price_change_percentage_24h, None);
    }

    #[test]
    fn test_market_summary_display_values() {
        let json = r#"{
            "data": {
                "total_market_cap": { "usd": 2510000000000.0, "eur": 2300000000000.0 },
                "total_volume": { "usd": 98000000000.0 },
                "market_cap_percentage": { "btc": 52.314, "eth": 16.9 },
                "market_cap_change_percentage_24h_usd": -1.42
            }
        }"#;

        let response: GlobalResponse = serde_json::from_str(json).unwrap();
        let summary = response.data.unwrap();
        assert_eq!(summary.market_cap(), "$2.51Tr");
        assert_eq!(summary.volume(), "$98.00Bn");
        assert_eq!(summary.btc_dominance(), "52.31%");
        assert_eq!(summary.market_cap_change_24h(), -1.42);
    }

    #[test]
    fn test_market_summary_missing_keys_are_empty() {
        let summary = MarketSummary::default();
        assert_eq!(summary.market_cap(), "");
        assert_eq!(summary.volume(), "");
        assert_eq!(summary.btc_dominance(), "");
    }
}
