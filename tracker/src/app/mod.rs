//! # Application Orchestrator
//!
//! The [`App`] struct owns the derivation graph and keeps [`HomeState`] in sync
//! with it. Fetches run on Tokio and report back through an event channel, so
//! every stage runs on one logical update thread.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Update loop (App)                       │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  process_at(now)                                       │  │
//! │  │  1. drain events -> graph inputs   (event_handler)     │  │
//! │  │  2. run ready stages               (derivation)        │  │
//! │  │  3. copy republished outputs into HomeState            │  │
//! │  └──────────────┬─────────────────────────────────────────┘  │
//! │                 │                                            │
//! │  ┌──────────────▼─────────────────────────────────────────┐  │
//! │  │  state: Arc<RwLock<HomeState>>                         │  │
//! │  │  - read by the presentation layer                      │  │
//! │  │  - written only here, lock held briefly                │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────┬───────────────────────────────────┘
//!                            │ async_channel (unbounded)
//! ┌──────────────────────────▼───────────────────────────────────┐
//! │                    Tokio tasks (tasks module)                │
//! │  fetch_coins / fetch_market_summary / portfolio worker       │
//! │  (one store call at a time, results sent in request order)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Driving the loop
//!
//! Hosts with their own frame loop call [`App::on_tick`] every frame. Hosts
//! without one await [`App::run`], which sleeps until the next event or the
//! end of a pending debounce window. Either way, user input can go through
//! [`App`] directly or through a cloneable [`AppHandle`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tracker::app::{App, Collaborators};
//! use tracker::services::api::ApiClient;
//! use tracker::services::portfolio::MemoryPortfolioStore;
//!
//! # async fn demo() {
//! let api = Arc::new(ApiClient::new("https://api.coingecko.com/api/v3", 10, 250));
//! let mut app = App::new(
//!     Collaborators {
//!         catalog: api.clone(),
//!         market: api,
//!         portfolio: Arc::new(MemoryPortfolioStore::default()),
//!     },
//!     tracker::app::SEARCH_DEBOUNCE,
//! );
//!
//! let handle = app.handle();
//! app.start();
//! handle.set_search_text("bit");
//! tokio::spawn(async move {
//!     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!     handle.shutdown();
//! });
//! app.run().await;
//!
//! let state = app.state.read();
//! println!("{} coins, {} statistics", state.coins.len(), state.statistics.len());
//! # }
//! ```

mod derivation;
mod event_handler;
mod events;
mod graph;
pub mod pipeline;
mod state;
mod tasks;

pub use derivation::{DerivationGraph, StageRun, SEARCH_DEBOUNCE};
pub use events::{AppEvent, DataSource};
pub use graph::{EdgePolicy, Published, StageGate};
pub use state::*;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_channel::{unbounded, Receiver, Sender};
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use shared::dto::market::Coin;

use crate::core::error::{AppError, Result};
use crate::core::service::{CoinCatalogSource, MarketDataSource, PortfolioStore};
use tasks::portfolio::PortfolioCommand;

/// The three external sources the app reads from.
#[derive(Clone)]
pub struct Collaborators {
    pub catalog: Arc<dyn CoinCatalogSource>,
    pub market: Arc<dyn MarketDataSource>,
    pub portfolio: Arc<dyn PortfolioStore>,
}

/// Derivation orchestrator.
///
/// All stage recomputation happens inside [`App::process_at`]; nothing else
/// writes derived values.
pub struct App {
    /// Published view state.
    ///
    /// - Use `read()` from the presentation layer
    /// - Only the update loop calls `write()`
    pub state: Arc<RwLock<HomeState>>,

    /// Results from fetch tasks and requests from [`AppHandle`]s.
    pub event_rx: Receiver<AppEvent>,

    event_tx: Sender<AppEvent>,
    collaborators: Collaborators,
    graph: DerivationGraph,
    running: bool,

    // every store call goes through one worker so results arrive in order
    portfolio_tx: Sender<PortfolioCommand>,
    // taken when the worker is spawned on first use
    portfolio_rx: Mutex<Option<Receiver<PortfolioCommand>>>,
}

impl App {
    /// Create an app with empty inputs. Nothing is fetched until [`App::start`].
    pub fn new(collaborators: Collaborators, search_debounce: Duration) -> Self {
        let (event_tx, event_rx) = unbounded();
        let (portfolio_tx, portfolio_rx) = unbounded();

        tracing::info!(
            search_debounce_ms = search_debounce.as_millis(),
            "App state initialized - event channel created"
        );

        App {
            state: Arc::new(RwLock::new(HomeState::default())),
            event_rx,
            event_tx,
            collaborators,
            graph: DerivationGraph::new(search_debounce),
            running: true,
            portfolio_tx,
            portfolio_rx: Mutex::new(Some(portfolio_rx)),
        }
    }

    /// Cloneable sender for user requests, usable from any thread.
    pub fn handle(&self) -> AppHandle {
        AppHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Kick off the initial catalog, market and portfolio loads.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) {
        tasks::market::fetch_coins(self.collaborators.catalog.clone(), self.event_tx.clone());
        tasks::market::fetch_market_summary(self.collaborators.market.clone(), self.event_tx.clone());
        self.queue_portfolio(PortfolioCommand::Load);
        tracing::info!("Initial catalog, market and portfolio loads started");
    }

    /// Called every frame by hosts with their own loop.
    pub fn on_tick(&mut self) -> StageRun {
        self.process_at(Instant::now())
    }

    /// Drain pending events, run every ready stage and publish the results.
    pub fn process_at(&mut self, now: Instant) -> StageRun {
        let mut events_processed = 0u32;
        while let Ok(event) = self.event_rx.try_recv() {
            events_processed += 1;
            self.handle_event(event, now);
        }

        let ran = self.graph.run(now);
        if ran.any() {
            self.publish_outputs(ran);
        }

        if events_processed > 0 || ran.any() {
            tracing::debug!(
                events_processed = events_processed,
                listing = ran.listing,
                portfolio = ran.portfolio,
                statistics = ran.statistics,
                "Update pass complete"
            );
        }
        ran
    }

    /// Drive the update loop until [`AppHandle::shutdown`].
    pub async fn run(&mut self) {
        self.running = true;
        loop {
            self.process_at(Instant::now());
            if !self.running {
                break;
            }

            let deadline = self.graph.next_deadline();
            let wait_for_deadline = async move {
                match deadline {
                    Some(deadline) => {
                        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
                    }
                    None => std::future::pending::<()>().await,
                }
            };

            // `self` holds a sender, so `recv` cannot fail while the loop runs
            let received = tokio::select! {
                event = self.event_rx.recv() => event.ok(),
                _ = wait_for_deadline => None,
            };

            if let Some(event) = received {
                self.handle_event(event, Instant::now());
            }
        }
        tracing::info!("Update loop stopped");
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.state.write().search_text = text.clone();
        self.graph.set_search_text(text);
    }

    pub fn set_sort_option(&mut self, sort: SortOption) {
        self.state.write().sort_option = sort;
        self.graph.set_sort_option(sort);
    }

    /// Re-fetch the catalog and the market summary.
    ///
    /// `is_loading` stays set until the statistics republish.
    pub fn reload_data(&mut self) {
        self.state.write().is_loading = true;
        tasks::market::fetch_coins(self.collaborators.catalog.clone(), self.event_tx.clone());
        tasks::market::fetch_market_summary(self.collaborators.market.clone(), self.event_tx.clone());
        tracing::info!("Reload requested - catalog and market fetches started");
    }

    /// Save `amount` of `coin`; zero or negative removes it.
    ///
    /// The new entry set arrives later as an event, like every other input.
    pub fn update_portfolio(&self, coin: &Coin, amount: f64) -> Result<()> {
        self.save_holding(coin.id.clone(), amount)
    }

    fn save_holding(&self, coin_id: String, amount: f64) -> Result<()> {
        if coin_id.is_empty() {
            return Err(AppError::Validation("Coin id must not be empty".to_string()));
        }
        if !amount.is_finite() {
            return Err(AppError::Validation(format!(
                "Holding amount must be a finite number, got {}",
                amount
            )));
        }

        self.queue_portfolio(PortfolioCommand::Save { coin_id, amount });
        Ok(())
    }

    /// Queue a store call, spawning the worker on first use.
    fn queue_portfolio(&self, command: PortfolioCommand) {
        if let Some(commands) = self.portfolio_rx.lock().take() {
            tasks::portfolio::spawn_worker(
                self.collaborators.portfolio.clone(),
                commands,
                self.event_tx.clone(),
            );
        }
        if let Err(e) = self.portfolio_tx.try_send(command) {
            tracing::warn!(command = ?e.into_inner(), "Portfolio worker is gone - command dropped");
        }
    }

    fn handle_event(&mut self, event: AppEvent, now: Instant) {
        use event_handler::AppEventHandler;
        self.handle_event_impl(event, now);
    }

    fn publish_outputs(&self, ran: StageRun) {
        let mut state = self.state.write();
        if ran.listing {
            state.coins = self.graph.listing().coins.clone();
        }
        if ran.portfolio {
            state.portfolio_coins = self.graph.portfolio().to_vec();
        }
        if ran.statistics {
            state.statistics = self.graph.statistics().to_vec();
            state.is_loading = false;
            state.last_updated = Some(Utc::now());

            for stat in &state.statistics {
                tracing::info!(
                    title = %stat.title,
                    value = %stat.value,
                    change = ?stat.percentage_change,
                    "Statistic"
                );
            }
        }
    }
}

/// Cloneable front door for user requests.
///
/// Every call becomes an [`AppEvent`] handled on the next update pass.
#[derive(Clone)]
pub struct AppHandle {
    event_tx: Sender<AppEvent>,
}

impl AppHandle {
    pub fn set_search_text(&self, text: impl Into<String>) {
        self.send(AppEvent::SearchTextChanged(text.into()));
    }

    pub fn set_sort_option(&self, sort: SortOption) {
        self.send(AppEvent::SortOptionChanged(sort));
    }

    pub fn reload_data(&self) {
        self.send(AppEvent::RefreshRequested);
    }

    pub fn update_portfolio(&self, coin_id: impl Into<String>, amount: f64) {
        self.send(AppEvent::PortfolioUpdateRequested {
            coin_id: coin_id.into(),
            amount,
        });
    }

    pub fn shutdown(&self) {
        self.send(AppEvent::Shutdown);
    }

    fn send(&self, event: AppEvent) {
        // unbounded: only fails once the app is gone
        if let Err(e) = self.event_tx.try_send(event) {
            tracing::debug!(event = ?e.into_inner(), "App is gone - request dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tasks::portfolio::tests::SlowFirstSaveStore;
    use crate::services::portfolio::MemoryPortfolioStore;
    use async_trait::async_trait;
    use shared::dto::market::MarketSummary;
    use shared::dto::portfolio::PortfolioEntry;
    use std::collections::HashMap;

    const DEBOUNCE: Duration = Duration::from_millis(50);

    struct FixedCatalog(Vec<Coin>);

    #[async_trait]
    impl CoinCatalogSource for FixedCatalog {
        async fn fetch_coins(&self) -> Result<Vec<Coin>> {
            Ok(self.0.clone())
        }
    }

    struct FixedMarket(Option<MarketSummary>);

    #[async_trait]
    impl MarketDataSource for FixedMarket {
        async fn fetch_market_summary(&self) -> Result<Option<MarketSummary>> {
            match &self.0 {
                Some(summary) => Ok(Some(summary.clone())),
                None => Err(AppError::Api("HTTP 500".to_string())),
            }
        }
    }

    fn coins() -> Vec<Coin> {
        vec![
            Coin::new("eth", "eth", "Ethereum", 2, 10.0),
            Coin::new("btc", "btc", "Bitcoin", 1, 100.0).with_change_24h(10.0),
        ]
    }

    fn summary() -> MarketSummary {
        MarketSummary {
            total_market_cap: HashMap::from([("usd".to_string(), 2_000_000_000_000.0)]),
            total_volume: HashMap::from([("usd".to_string(), 90_000_000_000.0)]),
            market_cap_percentage: HashMap::from([("btc".to_string(), 51.0)]),
            market_cap_change_percentage_24h_usd: 2.5,
        }
    }

    /// `market: None` makes every market fetch fail.
    fn test_app(market: Option<MarketSummary>, entries: Vec<PortfolioEntry>) -> App {
        App::new(
            Collaborators {
                catalog: Arc::new(FixedCatalog(coins())),
                market: Arc::new(FixedMarket(market)),
                portfolio: Arc::new(MemoryPortfolioStore::with_entries(entries)),
            },
            DEBOUNCE,
        )
    }

    /// Wait for `count` task results and apply them.
    async fn deliver(app: &mut App, count: usize, now: Instant) {
        for _ in 0..count {
            let event = tokio::time::timeout(Duration::from_secs(2), app.event_rx.recv())
                .await
                .expect("timed out waiting for task result")
                .expect("event channel closed");
            app.handle_event(event, now);
        }
    }

    fn ids(coins: &[Coin]) -> Vec<&str> {
        coins.iter().map(|c| c.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_initial_load_flows_through_all_stages() {
        let mut app = test_app(Some(summary()), vec![PortfolioEntry::new("btc", 2.0)]);
        let now = Instant::now();

        app.start();
        deliver(&mut app, 3, now).await;

        app.process_at(now);
        {
            let state = app.state.read();
            // coin list is still inside its debounce window
            assert!(state.coins.is_empty());
            assert_eq!(state.statistics.len(), 4);
            assert_eq!(state.statistics[3].value, "$0.00");
        }

        let ran = app.process_at(now + DEBOUNCE);
        assert!(ran.listing && ran.portfolio && ran.statistics);

        let state = app.state.read();
        assert_eq!(ids(&state.coins), vec!["btc", "eth"]);
        assert_eq!(ids(&state.portfolio_coins), vec!["btc"]);
        assert_eq!(state.portfolio_coins[0].current_holdings_value(), 200.0);
        assert_eq!(state.statistics[3].value, "$200.00");
        assert!((state.statistics[3].percentage_change.unwrap() - 10.0).abs() < 1e-9);
        assert!(state.last_updated.is_some());
    }

    #[tokio::test]
    async fn test_reload_keeps_loading_until_statistics_republish() {
        let mut app = test_app(Some(summary()), Vec::new());
        let now = Instant::now();
        app.process_at(now);

        app.reload_data();
        assert!(app.state.read().is_loading);

        // tasks have not reported back yet
        app.process_at(now);
        assert!(app.state.read().is_loading);

        deliver(&mut app, 2, now).await;
        let ran = app.process_at(now);
        assert!(ran.statistics);
        let state = app.state.read();
        assert!(!state.is_loading);
        assert_eq!(state.statistics.len(), 4);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_statistics_and_clears_loading() {
        let mut app = test_app(None, Vec::new());
        let now = Instant::now();
        app.handle_event(AppEvent::MarketSummaryPublished(Some(summary())), now);
        app.process_at(now);
        let before = app.state.read().statistics.clone();
        assert_eq!(before.len(), 4);

        app.reload_data();
        deliver(&mut app, 2, now).await;
        app.process_at(now);

        let state = app.state.read();
        assert!(!state.is_loading);
        assert_eq!(state.statistics, before);
    }

    #[tokio::test]
    async fn test_update_portfolio_goes_through_store() {
        let mut app = test_app(Some(summary()), Vec::new());
        let now = Instant::now();
        app.handle_event(AppEvent::CoinsPublished(coins()), now);
        app.process_at(now);
        app.process_at(now + DEBOUNCE);
        assert!(app.state.read().portfolio_coins.is_empty());

        let eth = coins()[0].clone();
        app.update_portfolio(&eth, 3.0).unwrap();
        deliver(&mut app, 1, now + DEBOUNCE).await;
        app.process_at(now + DEBOUNCE);

        let state = app.state.read();
        assert_eq!(ids(&state.portfolio_coins), vec!["eth"]);
        assert_eq!(state.portfolio_coins[0].current_holdings, Some(3.0));
    }

    #[tokio::test]
    async fn test_quick_updates_publish_the_latest_entries() {
        let mut app = App::new(
            Collaborators {
                catalog: Arc::new(FixedCatalog(coins())),
                market: Arc::new(FixedMarket(Some(summary()))),
                portfolio: Arc::new(SlowFirstSaveStore::default()),
            },
            DEBOUNCE,
        );
        let now = Instant::now();
        app.handle_event(AppEvent::CoinsPublished(coins()), now);
        app.process_at(now);
        app.process_at(now + DEBOUNCE);

        let eth = coins()[0].clone();
        let btc = coins()[1].clone();
        app.update_portfolio(&btc, 1.0).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        app.update_portfolio(&eth, 2.0).unwrap();
        deliver(&mut app, 2, now + DEBOUNCE).await;
        app.process_at(now + DEBOUNCE);

        let state = app.state.read();
        // holdings order: eth 20 < btc 100
        assert_eq!(ids(&state.portfolio_coins), vec!["eth", "btc"]);
        assert_eq!(state.portfolio_coins[0].current_holdings, Some(2.0));
    }

    #[tokio::test]
    async fn test_update_portfolio_rejects_non_finite_amount() {
        let app = test_app(Some(summary()), Vec::new());
        let eth = coins()[0].clone();

        assert!(matches!(
            app.update_portfolio(&eth, f64::NAN),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            app.update_portfolio(&eth, f64::INFINITY),
            Err(AppError::Validation(_))
        ));
        assert!(app.event_rx.is_empty());
    }

    #[tokio::test]
    async fn test_handle_requests_apply_on_next_pass() {
        let mut app = test_app(Some(summary()), Vec::new());
        let handle = app.handle();
        let now = Instant::now();

        handle.set_search_text("bt");
        handle.set_sort_option(SortOption::PriceReversed);
        app.process_at(now);

        let state = app.state.read();
        assert_eq!(state.search_text, "bt");
        assert_eq!(state.sort_option, SortOption::PriceReversed);
    }

    #[tokio::test]
    async fn test_handle_update_portfolio_reaches_store() {
        let mut app = test_app(Some(summary()), Vec::new());
        let handle = app.handle();
        let now = Instant::now();

        handle.update_portfolio("btc", 1.0);
        app.process_at(now);
        match tokio::time::timeout(Duration::from_secs(2), app.event_rx.recv()).await {
            Ok(Ok(AppEvent::PortfolioPublished(entries))) => {
                assert_eq!(entries, vec![PortfolioEntry::new("btc", 1.0)]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let mut app = test_app(Some(summary()), Vec::new());
        app.handle().shutdown();
        tokio::time::timeout(Duration::from_secs(2), app.run())
            .await
            .expect("run did not stop");
    }

    #[tokio::test]
    async fn test_run_applies_debounced_search() {
        let mut app = test_app(Some(summary()), Vec::new());
        let handle = app.handle();
        app.start();
        handle.set_search_text("eth");

        let stopper = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(400)).await;
            stopper.shutdown();
        });
        tokio::time::timeout(Duration::from_secs(5), app.run())
            .await
            .expect("run did not stop");

        let state = app.state.read();
        assert_eq!(ids(&state.coins), vec!["eth"]);
        assert_eq!(state.statistics.len(), 4);
        assert!(!state.is_loading);
    }
}
