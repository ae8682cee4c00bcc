//! # Application State Types
//!
//! The sort option, the statistic row, and [`HomeState`], the snapshot the
//! presentation layer reads.

use chrono::{DateTime, Utc};
use shared::dto::market::Coin;

/// Ordering applied to the coin list and, for the holdings variants, to the
/// portfolio list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Rank ascending
    Rank,
    /// Rank descending
    RankReversed,
    /// Rank ascending for the full list, holdings value ascending for the portfolio
    #[default]
    Holdings,
    /// Rank descending for the full list, holdings value descending for the portfolio
    HoldingsReversed,
    /// Current price ascending
    Price,
    /// Current price descending
    PriceReversed,
}

impl SortOption {
    pub fn all() -> &'static [SortOption] {
        &[
            SortOption::Rank,
            SortOption::RankReversed,
            SortOption::Holdings,
            SortOption::HoldingsReversed,
            SortOption::Price,
            SortOption::PriceReversed,
        ]
    }

    /// Column header label
    pub fn title(&self) -> &'static str {
        match self {
            SortOption::Rank | SortOption::RankReversed => "Rank",
            SortOption::Holdings | SortOption::HoldingsReversed => "Holdings",
            SortOption::Price | SortOption::PriceReversed => "Price",
        }
    }

    /// The same column in the opposite direction (what tapping a header twice does).
    pub fn reversed(&self) -> SortOption {
        match self {
            SortOption::Rank => SortOption::RankReversed,
            SortOption::RankReversed => SortOption::Rank,
            SortOption::Holdings => SortOption::HoldingsReversed,
            SortOption::HoldingsReversed => SortOption::Holdings,
            SortOption::Price => SortOption::PriceReversed,
            SortOption::PriceReversed => SortOption::Price,
        }
    }
}

/// Output of the filter/sort stage: the ordered coins together with the sort
/// option they were ordered by.
///
/// The portfolio stage reads the option from here, so it never looks at the
/// live (possibly not yet debounced) user selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedCoins {
    pub coins: Vec<Coin>,
    pub sort: SortOption,
}

/// One header statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistic {
    pub title: String,
    pub value: String,
    pub percentage_change: Option<f64>,
}

impl Statistic {
    pub const MARKET_CAP: &'static str = "Market Cap";
    pub const VOLUME: &'static str = "24H Volume";
    pub const BTC_DOMINANCE: &'static str = "BTC Dominance";
    pub const PORTFOLIO_VALUE: &'static str = "Portfolio Value";

    /// Titles in the order statistics are always produced.
    pub const TITLES: [&'static str; 4] = [
        Self::MARKET_CAP,
        Self::VOLUME,
        Self::BTC_DOMINANCE,
        Self::PORTFOLIO_VALUE,
    ];

    pub fn new(title: impl Into<String>, value: impl Into<String>, percentage_change: Option<f64>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            percentage_change,
        }
    }
}

/// Snapshot of everything the home screen renders.
///
/// Written only by the update loop; readers take the lock briefly.
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    /// Filtered and sorted catalog
    pub coins: Vec<Coin>,
    /// Held coins with holdings and holdings value filled in
    pub portfolio_coins: Vec<Coin>,
    /// Empty, or exactly four entries in [`Statistic::TITLES`] order
    pub statistics: Vec<Statistic>,
    /// Set by a refresh, cleared when the statistics republish
    pub is_loading: bool,
    pub search_text: String,
    pub sort_option: SortOption,
    /// When the statistics last republished
    pub last_updated: Option<DateTime<Utc>>,
}
