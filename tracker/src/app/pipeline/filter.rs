//! Filter/sort stage: search text + catalog + sort option -> ordered coins.

use shared::dto::market::Coin;

use crate::app::state::SortOption;

/// Keep coins whose name, symbol or id contains `text`, ignoring case.
///
/// Empty text keeps every coin.
pub fn filter_coins(text: &str, coins: &[Coin]) -> Vec<Coin> {
    if text.is_empty() {
        return coins.to_vec();
    }

    let needle = text.to_lowercase();
    coins
        .iter()
        .filter(|coin| {
            coin.name.to_lowercase().contains(&needle)
                || coin.symbol.to_lowercase().contains(&needle)
                || coin.id.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Order the full list. The holdings variants fall back to rank here; holdings
/// ordering only applies to the portfolio list.
pub fn sort_coins(sort: SortOption, coins: &mut [Coin]) {
    match sort {
        SortOption::Rank | SortOption::Holdings => {
            coins.sort_by_key(|coin| coin.rank());
        }
        SortOption::RankReversed | SortOption::HoldingsReversed => {
            coins.sort_by(|a, b| b.rank().cmp(&a.rank()));
        }
        SortOption::Price => {
            coins.sort_by(|a, b| a.current_price.total_cmp(&b.current_price));
        }
        SortOption::PriceReversed => {
            coins.sort_by(|a, b| b.current_price.total_cmp(&a.current_price));
        }
    }
}

pub fn filter_and_sort(text: &str, coins: &[Coin], sort: SortOption) -> Vec<Coin> {
    let mut filtered = filter_coins(text, coins);
    sort_coins(sort, &mut filtered);
    filtered
}
