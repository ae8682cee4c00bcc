//! # Application Events
//!
//! Everything that reaches the update loop arrives as an [`AppEvent`]: results
//! from fetch tasks and requests from the presentation layer alike.

use shared::dto::market::{Coin, MarketSummary};
use shared::dto::portfolio::PortfolioEntry;

use crate::app::state::SortOption;

/// Which collaborator an event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Catalog,
    Market,
    Portfolio,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Catalog => write!(f, "catalog"),
            DataSource::Market => write!(f, "market"),
            DataSource::Portfolio => write!(f, "portfolio"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// New coin catalog snapshot
    CoinsPublished(Vec<Coin>),
    /// New market summary (`None` when the API had no data)
    MarketSummaryPublished(Option<MarketSummary>),
    /// New portfolio entry set
    PortfolioPublished(Vec<PortfolioEntry>),
    /// A collaborator call failed; last published values stay in place
    FetchFailed { source: DataSource, error: String },
    /// User edited the search field
    SearchTextChanged(String),
    /// User picked a sort option
    SortOptionChanged(SortOption),
    /// User asked for fresh catalog and market data
    RefreshRequested,
    /// User saved a holding
    PortfolioUpdateRequested { coin_id: String, amount: f64 },
    /// Stop the update loop
    Shutdown,
}
