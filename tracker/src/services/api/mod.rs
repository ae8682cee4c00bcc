//! # Market Data API Client Module
//!
//! HTTP client for the CoinGecko v3 API (or anything serving the same shape).
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs      - Module exports and documentation
//! ├── client.rs   - ApiClient struct and collaborator trait impls
//! └── market.rs   - Catalog and global market endpoints
//! ```

pub mod client;
pub mod market;

pub use client::ApiClient;
pub use market::{get_coins, get_global_market};
