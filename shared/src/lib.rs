//! # Shared Market Data Types
//!
//! Types shared between the tracker core and anything that talks to the
//! market data API or the portfolio store.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::market`]**: Coins and the global market summary
//!   - **[`dto::portfolio`]**: Saved portfolio entries
//! - **[`utils`]**: Pure formatting functions for prices, percentages and
//!   abbreviated large numbers
//!
//! ## Wire Format
//!
//! DTOs mirror the CoinGecko v3 JSON payloads:
//! - Field names are **snake_case**, matching the API
//! - Market fields the API may omit or null are `Option`s
//! - Client-only fields (such as `Coin::current_holdings`) are skipped when `None`
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::market::Coin;
//! use shared::utils::format_currency_2;
//!
//! let coin = Coin::new("bitcoin", "btc", "Bitcoin", 1, 64_000.0).with_holdings(0.5);
//! assert_eq!(format_currency_2(coin.current_holdings_value()), "$32,000.00");
//! ```

pub mod dto;
pub mod utils;

// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
