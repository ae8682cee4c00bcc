//! # Derivation Stages
//!
//! Pure functions behind each stage of the derivation graph:
//!
//! | Stage | Inputs | Output |
//! |-------|--------|--------|
//! | [`filter`] | search text, all coins, sort option | [`SortedCoins`](crate::app::state::SortedCoins) |
//! | [`portfolio`] | sorted coins, portfolio entries | held coins with values |
//! | [`statistics`] | market summary, held coins | four [`Statistic`](crate::app::state::Statistic)s or none |
//!
//! None of these read shared state or the clock; the same inputs always give
//! the same output.

pub mod filter;
pub mod portfolio;
pub mod statistics;

pub use filter::filter_and_sort;
pub use portfolio::portfolio_coins;
pub use statistics::market_statistics;
