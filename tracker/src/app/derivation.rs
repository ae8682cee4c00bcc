//! # Derivation Graph
//!
//! Wires the three stages into a chain:
//!
//! ```text
//! search_text ─┐
//! all_coins ───┼─(debounce)─> [filter/sort] ─> listing ─┐
//! sort_option ─┘                                        ├─> [portfolio] ─> portfolio ─┐
//!                              portfolio_entries ───────┘                             ├─> [statistics] ─> statistics
//!                                                        market_summary ──────────────┘
//! ```
//!
//! Inputs are set from the update loop; [`DerivationGraph::run`] then brings
//! every stage whose gate is ready up to date, upstream first, in one pass. A
//! stage that fires republishes its output, which bumps the version the next
//! stage's gate sees, so a change flows all the way down in the same pass
//! unless a debounce holds it back.

use std::time::{Duration, Instant};

use shared::dto::market::{Coin, MarketSummary};
use shared::dto::portfolio::PortfolioEntry;

use crate::app::graph::{EdgePolicy, Published, StageGate};
use crate::app::pipeline::{filter_and_sort, market_statistics, portfolio_coins};
use crate::app::state::{SortOption, SortedCoins, Statistic};

/// Quiescence window of the filter/sort stage.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Which stages republished during one [`DerivationGraph::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageRun {
    pub listing: bool,
    pub portfolio: bool,
    pub statistics: bool,
}

impl StageRun {
    pub fn any(&self) -> bool {
        self.listing || self.portfolio || self.statistics
    }
}

#[derive(Debug)]
pub struct DerivationGraph {
    search_text: Published<String>,
    sort_option: Published<SortOption>,
    all_coins: Published<Vec<Coin>>,
    market_summary: Published<Option<MarketSummary>>,
    portfolio_entries: Published<Vec<PortfolioEntry>>,

    listing: Published<SortedCoins>,
    portfolio: Published<Vec<Coin>>,
    statistics: Published<Vec<Statistic>>,

    // [search_text, all_coins, sort_option]
    listing_gate: StageGate<3>,
    // [listing, portfolio_entries]
    portfolio_gate: StageGate<2>,
    // [market_summary, portfolio]
    statistics_gate: StageGate<2>,
}

impl DerivationGraph {
    pub fn new(search_debounce: Duration) -> Self {
        Self {
            search_text: Published::default(),
            sort_option: Published::default(),
            all_coins: Published::default(),
            market_summary: Published::default(),
            portfolio_entries: Published::default(),
            listing: Published::default(),
            portfolio: Published::default(),
            statistics: Published::default(),
            listing_gate: StageGate::new(EdgePolicy::Debounce(search_debounce)),
            portfolio_gate: StageGate::new(EdgePolicy::Immediate),
            statistics_gate: StageGate::new(EdgePolicy::Immediate),
        }
    }

    pub fn set_search_text(&mut self, text: String) {
        self.search_text.publish(text);
    }

    pub fn set_sort_option(&mut self, sort: SortOption) {
        self.sort_option.publish(sort);
    }

    pub fn set_all_coins(&mut self, coins: Vec<Coin>) {
        self.all_coins.publish(coins);
    }

    pub fn set_market_summary(&mut self, summary: Option<MarketSummary>) {
        self.market_summary.publish(summary);
    }

    pub fn set_portfolio_entries(&mut self, entries: Vec<PortfolioEntry>) {
        self.portfolio_entries.publish(entries);
    }

    /// Make the statistics stage republish on the next run even if neither of
    /// its inputs changed.
    pub fn republish_statistics(&mut self, now: Instant) {
        self.statistics_gate.force(now);
    }

    /// Run every ready stage, upstream first.
    pub fn run(&mut self, now: Instant) -> StageRun {
        let mut ran = StageRun::default();

        let listing_inputs = [
            self.search_text.version(),
            self.all_coins.version(),
            self.sort_option.version(),
        ];
        if self.listing_gate.poll(listing_inputs, now) {
            let sort = *self.sort_option.get();
            let coins = filter_and_sort(self.search_text.get(), self.all_coins.get(), sort);
            tracing::debug!(
                count = coins.len(),
                search = %self.search_text.get(),
                sort = ?sort,
                "Coin list republished"
            );
            self.listing.publish(SortedCoins { coins, sort });
            ran.listing = true;
        }

        let portfolio_inputs = [self.listing.version(), self.portfolio_entries.version()];
        if self.portfolio_gate.poll(portfolio_inputs, now) {
            let held = portfolio_coins(self.listing.get(), self.portfolio_entries.get());
            tracing::debug!(count = held.len(), "Portfolio coins republished");
            self.portfolio.publish(held);
            ran.portfolio = true;
        }

        let statistics_inputs = [self.market_summary.version(), self.portfolio.version()];
        if self.statistics_gate.poll(statistics_inputs, now) {
            let stats = market_statistics(self.market_summary.get().as_ref(), self.portfolio.get());
            tracing::debug!(count = stats.len(), "Statistics republished");
            self.statistics.publish(stats);
            ran.statistics = true;
        }

        ran
    }

    /// When the next pending stage becomes ready, if any stage is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.listing_gate.deadline(),
            self.portfolio_gate.deadline(),
            self.statistics_gate.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn search_text(&self) -> &str {
        self.search_text.get()
    }

    pub fn sort_option(&self) -> SortOption {
        *self.sort_option.get()
    }

    pub fn all_coins(&self) -> &[Coin] {
        self.all_coins.get()
    }

    pub fn listing(&self) -> &SortedCoins {
        self.listing.get()
    }

    pub fn portfolio(&self) -> &[Coin] {
        self.portfolio.get()
    }

    pub fn statistics(&self) -> &[Statistic] {
        self.statistics.get()
    }
}

impl Default for DerivationGraph {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
