//! # Data Transfer Objects (DTOs)
//!
//! Data structures received from the market data API and exchanged with the
//! portfolio store.
//!
//! ## Module Organization
//!
//! - [`market`] - Coins (`/coins/markets`) and the global summary (`/global`)
//! - [`portfolio`] - Saved `(coin id, amount)` entries
//!
//! ## Example JSON
//!
//! ```text
//! GET /api/v3/global
//!
//! {
//!   "data": {
//!     "total_market_cap": { "usd": 2510000000000.0 },
//!     "total_volume": { "usd": 98000000000.0 },
//!     "market_cap_percentage": { "btc": 52.31 },
//!     "market_cap_change_percentage_24h_usd": -1.42
//!   }
//! }
//! ```

pub mod market;
pub mod portfolio;

pub use market::*;
pub use portfolio::*;
