//! # Core Abstractions
//!
//! Error types and collaborator traits shared by every other module.
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: Traits for the coin catalog, market data and portfolio
//!   store collaborators
//!
//! ## Dependency Injection
//!
//! The orchestrator only sees the traits:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tracker::core::service::{CoinCatalogSource, MarketDataSource};
//! use tracker::services::api::ApiClient;
//!
//! let api = Arc::new(ApiClient::new("https://api.coingecko.com/api/v3", 10, 250));
//! let catalog: Arc<dyn CoinCatalogSource> = api.clone();
//! let market: Arc<dyn MarketDataSource> = api;
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{CoinCatalogSource, MarketDataSource, PortfolioStore};
