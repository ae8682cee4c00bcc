//! # Crypto Tracker Core - Library Root
//!
//! Reactive derivation core of a crypto market and portfolio tracker. Three
//! independently updating sources (coin catalog, market summary, saved
//! portfolio) and two user inputs (search text, sort option) are turned into
//! three view states: the filtered and sorted coin list, the held coins with
//! their values, and the header statistics.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                 tracker (this crate)                   │
//! ├────────────────────────────────────────────────────────┤
//! │  app       - derivation graph + update loop            │
//! │  core      - AppError, collaborator traits             │
//! │  services  - HTTP API client, portfolio stores         │
//! │  config    - TRACKER_* environment settings            │
//! │  debug     - tracing subscriber setup                  │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP (reqwest)                │ JSON file
//!          ▼                               ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  CoinGecko v3   │          │  data/portfolio.json    │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ### Stages
//!
//! | Stage | Recomputes on | Policy |
//! |-------|---------------|--------|
//! | filter/sort | search text, catalog, sort option | 500 ms debounce |
//! | portfolio join | sorted coins, portfolio entries | immediate |
//! | statistics | market summary, held coins | immediate |
//!
//! Stage functions are pure ([`app::pipeline`]); [`app::App`] owns the graph
//! and is the only writer of [`app::HomeState`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tracker::app::{App, Collaborators};
//! use tracker::config::AppConfig;
//! use tracker::services::{api::ApiClient, portfolio::JsonPortfolioStore};
//!
//! # async fn demo() -> tracker::core::Result<()> {
//! let config = AppConfig::from_env()?;
//! config.validate()?;
//!
//! let api = Arc::new(ApiClient::from_config(&config));
//! let mut app = App::new(
//!     Collaborators {
//!         catalog: api.clone(),
//!         market: api,
//!         portfolio: Arc::new(JsonPortfolioStore::new(config.portfolio_path.clone())),
//!     },
//!     config.search_debounce(),
//! );
//! app.start();
//! app.run().await;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
