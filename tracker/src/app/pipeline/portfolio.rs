//! Portfolio stage: sorted coins + saved entries -> held coins with valuations.

use std::collections::{HashMap, HashSet};

use shared::dto::market::Coin;
use shared::dto::portfolio::PortfolioEntry;

use crate::app::state::{SortOption, SortedCoins};

/// Join listed coins with the entries that hold them.
///
/// Output follows the order of `coins`. Entries without an amount are skipped;
/// when several entries name the same coin the first one with an amount wins.
/// Entries whose coin is not in `coins` are dropped: the catalog may simply
/// not have caught up yet.
pub fn join_portfolio(coins: &[Coin], entries: &[PortfolioEntry]) -> Vec<Coin> {
    let mut holdings: HashMap<&str, f64> = HashMap::with_capacity(entries.len());
    for entry in entries {
        if let Some(amount) = entry.amount {
            holdings.entry(entry.coin_id.as_str()).or_insert(amount);
        }
    }

    let mut joined = Vec::with_capacity(holdings.len());
    let mut seen: HashSet<&str> = HashSet::with_capacity(holdings.len());
    for coin in coins {
        if let Some(amount) = holdings.get(coin.id.as_str()) {
            if seen.insert(coin.id.as_str()) {
                joined.push(coin.with_holdings(*amount));
            }
        }
    }

    if joined.len() < holdings.len() {
        let orphans: Vec<&str> = holdings
            .keys()
            .filter(|id| !seen.contains(*id))
            .copied()
            .collect();
        tracing::debug!(
            orphan_count = orphans.len(),
            orphans = ?orphans,
            "Portfolio entries without a listed coin dropped from join"
        );
    }

    joined
}

/// Apply holdings ordering for the holdings sort options; keep join order otherwise.
pub fn sort_portfolio(mut coins: Vec<Coin>, sort: SortOption) -> Vec<Coin> {
    match sort {
        SortOption::Holdings => {
            coins.sort_by(|a, b| a.current_holdings_value().total_cmp(&b.current_holdings_value()));
        }
        SortOption::HoldingsReversed => {
            coins.sort_by(|a, b| b.current_holdings_value().total_cmp(&a.current_holdings_value()));
        }
        _ => {}
    }
    coins
}

/// The whole stage: join, then order by the option `listing` was sorted with.
pub fn portfolio_coins(listing: &SortedCoins, entries: &[PortfolioEntry]) -> Vec<Coin> {
    sort_portfolio(join_portfolio(&listing.coins, entries), listing.sort)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(sort: SortOption) -> SortedCoins {
        SortedCoins {
            coins: vec![
                Coin::new("btc", "btc", "Bitcoin", 1, 100.0),
                Coin::new("eth", "eth", "Ethereum", 2, 10.0),
                Coin::new("sol", "sol", "Solana", 5, 1.0),
            ],
            sort,
        }
    }

    fn ids(coins: &[Coin]) -> Vec<&str> {
        coins.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_join_fills_holdings_and_value() {
        let coins = vec![Coin::new("btc", "btc", "Bitcoin", 1, 100.0).with_change_24h(10.0)];
        let entries = vec![PortfolioEntry::new("btc", 2.0)];

        let joined = join_portfolio(&coins, &entries);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].id, "btc");
        assert_eq!(joined[0].current_holdings, Some(2.0));
        assert_eq!(joined[0].current_holdings_value(), 200.0);
    }

    #[test]
    fn test_orphan_entry_is_dropped() {
        let coins = listing(SortOption::Rank).coins;
        let entries = vec![PortfolioEntry::new("doge", 1000.0), PortfolioEntry::new("eth", 1.0)];

        let joined = join_portfolio(&coins, &entries);
        assert_eq!(ids(&joined), vec!["eth"]);
    }

    #[test]
    fn test_absent_amount_is_not_held() {
        let coins = listing(SortOption::Rank).coins;
        let entries = vec![
            PortfolioEntry { coin_id: "btc".into(), amount: None },
            PortfolioEntry::new("sol", 3.0),
        ];
        assert_eq!(ids(&join_portfolio(&coins, &entries)), vec!["sol"]);
    }

    #[test]
    fn test_duplicate_entries_join_once() {
        let coins = listing(SortOption::Rank).coins;
        let entries = vec![
            PortfolioEntry { coin_id: "eth".into(), amount: None },
            PortfolioEntry::new("eth", 1.0),
            PortfolioEntry::new("eth", 5.0),
        ];
        let joined = join_portfolio(&coins, &entries);
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].current_holdings, Some(1.0));
    }

    #[test]
    fn test_duplicate_listed_coin_joins_once() {
        let coin = Coin::new("btc", "btc", "Bitcoin", 1, 100.0);
        let coins = vec![coin.clone(), coin];
        let joined = join_portfolio(&coins, &[PortfolioEntry::new("btc", 1.0)]);
        assert_eq!(joined.len(), 1);
    }

    #[test]
    fn test_join_keeps_listing_order() {
        let coins = listing(SortOption::Rank).coins;
        let entries = vec![PortfolioEntry::new("sol", 1.0), PortfolioEntry::new("btc", 1.0)];
        assert_eq!(ids(&join_portfolio(&coins, &entries)), vec!["btc", "sol"]);
    }

    #[test]
    fn test_joined_coins_come_from_listing() {
        let listing = listing(SortOption::Price);
        let entries = vec![
            PortfolioEntry::new("btc", 1.0),
            PortfolioEntry::new("ada", 1.0),
            PortfolioEntry::new("sol", 1.0),
        ];
        let result = portfolio_coins(&listing, &entries);
        for coin in &result {
            assert!(listing.coins.iter().any(|c| c.id == coin.id));
        }
        let unique: HashSet<&str> = result.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(unique.len(), result.len());
    }

    #[test]
    fn test_holdings_sorts_by_value() {
        // values: btc 1 * 100 = 100, eth 50 * 10 = 500, sol 20 * 1 = 20
        let entries = vec![
            PortfolioEntry::new("btc", 1.0),
            PortfolioEntry::new("eth", 50.0),
            PortfolioEntry::new("sol", 20.0),
        ];

        let asc = portfolio_coins(&listing(SortOption::Holdings), &entries);
        assert_eq!(ids(&asc), vec!["sol", "btc", "eth"]);

        let desc = portfolio_coins(&listing(SortOption::HoldingsReversed), &entries);
        assert_eq!(ids(&desc), vec!["eth", "btc", "sol"]);
    }

    #[test]
    fn test_other_sorts_keep_join_order() {
        let entries = vec![
            PortfolioEntry::new("btc", 1.0),
            PortfolioEntry::new("eth", 50.0),
            PortfolioEntry::new("sol", 20.0),
        ];
        for sort in [SortOption::Rank, SortOption::RankReversed, SortOption::Price, SortOption::PriceReversed] {
            let result = portfolio_coins(&listing(sort), &entries);
            assert_eq!(ids(&result), vec!["btc", "eth", "sol"], "sort {:?}", sort);
        }
    }

    #[test]
    fn test_same_inputs_same_output() {
        let entries = vec![PortfolioEntry::new("eth", 2.0), PortfolioEntry::new("btc", 1.0)];
        let listing = listing(SortOption::HoldingsReversed);
        assert_eq!(portfolio_coins(&listing, &entries), portfolio_coins(&listing, &entries));
    }
}
