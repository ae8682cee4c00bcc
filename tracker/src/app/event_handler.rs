//! # Event Handler
//!
//! Applies [`AppEvent`]s to the derivation graph inputs. Stages are not run
//! here; [`App::process_at`] runs them once after the whole batch of events.

use std::time::Instant;

use crate::app::events::{AppEvent, DataSource};
use crate::app::App;

/// Trait for event handling implementation
pub(crate) trait AppEventHandler {
    fn handle_event_impl(&mut self, event: AppEvent, now: Instant);
}

impl AppEventHandler for App {
    fn handle_event_impl(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::CoinsPublished(coins) => {
                tracing::info!(count = coins.len(), "Coin catalog published");
                self.graph.set_all_coins(coins);
            }
            AppEvent::MarketSummaryPublished(summary) => {
                tracing::info!(has_data = summary.is_some(), "Market summary published");
                self.graph.set_market_summary(summary);
            }
            AppEvent::PortfolioPublished(entries) => {
                tracing::info!(count = entries.len(), "Portfolio entries published");
                self.graph.set_portfolio_entries(entries);
            }
            AppEvent::FetchFailed { source, error } => {
                self.handle_fetch_failed(source, error, now);
            }
            AppEvent::SearchTextChanged(text) => {
                self.set_search_text(text);
            }
            AppEvent::SortOptionChanged(sort) => {
                self.set_sort_option(sort);
            }
            AppEvent::RefreshRequested => {
                self.reload_data();
            }
            AppEvent::PortfolioUpdateRequested { coin_id, amount } => {
                if let Err(e) = self.save_holding(coin_id, amount) {
                    tracing::warn!(error = %e, "Portfolio update rejected");
                }
            }
            AppEvent::Shutdown => {
                tracing::info!("Shutdown requested");
                self.running = false;
            }
        }
    }
}

impl App {
    fn handle_fetch_failed(&mut self, source: DataSource, error: String, now: Instant) {
        let is_loading = self.state.read().is_loading;
        tracing::warn!(
            source = %source,
            error = %error,
            is_loading = is_loading,
            "Fetch failed - last published values stay in place"
        );

        // Nothing new will arrive from this refresh, so let the loading flag
        // clear on the next pass.
        if is_loading {
            self.graph.republish_statistics(now);
        }
    }
}
