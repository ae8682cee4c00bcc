//! Statistics stage: market summary + portfolio coins -> header statistics.

use shared::dto::market::{Coin, MarketSummary};
use shared::utils::format_currency_2;

use crate::app::state::Statistic;

/// Sum of holdings values.
pub fn portfolio_value(portfolio: &[Coin]) -> f64 {
    portfolio.iter().map(Coin::current_holdings_value).sum()
}

/// Portfolio value 24h ago, backed out of each coin's 24h percentage change.
///
/// A coin without a change counts as unchanged. A change of -100% or below
/// has no finite prior price, so such a coin contributes its current value.
pub fn previous_portfolio_value(portfolio: &[Coin]) -> f64 {
    portfolio
        .iter()
        .map(|coin| {
            let current = coin.current_holdings_value();
            let fraction = coin.price_change_percentage_24h.unwrap_or(0.0) / 100.0;
            let divisor = 1.0 + fraction;
            if divisor > 0.0 && divisor.is_finite() {
                current / divisor
            } else {
                current
            }
        })
        .sum()
}

/// 24h percent change of the whole portfolio.
///
/// `None` when there is nothing to compare against: the previous value is zero
/// (for example an empty portfolio) or not a finite number.
pub fn portfolio_change(portfolio: &[Coin]) -> Option<f64> {
    let previous = previous_portfolio_value(portfolio);
    if previous == 0.0 || !previous.is_finite() {
        return None;
    }
    let change = (portfolio_value(portfolio) - previous) / previous * 100.0;
    change.is_finite().then_some(change)
}

/// The four header statistics, or none at all without a market summary.
pub fn market_statistics(summary: Option<&MarketSummary>, portfolio: &[Coin]) -> Vec<Statistic> {
    let Some(summary) = summary else {
        return Vec::new();
    };

    vec![
        Statistic::new(
            Statistic::MARKET_CAP,
            summary.market_cap(),
            Some(summary.market_cap_change_24h()),
        ),
        Statistic::new(Statistic::VOLUME, summary.volume(), None),
        Statistic::new(Statistic::BTC_DOMINANCE, summary.btc_dominance(), None),
        Statistic::new(
            Statistic::PORTFOLIO_VALUE,
            format_currency_2(portfolio_value(portfolio)),
            portfolio_change(portfolio),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn summary() -> MarketSummary {
        MarketSummary {
            total_market_cap: HashMap::from([("usd".to_string(), 2_510_000_000_000.0)]),
            total_volume: HashMap::from([("usd".to_string(), 98_000_000_000.0)]),
            market_cap_percentage: HashMap::from([("btc".to_string(), 52.314)]),
            market_cap_change_percentage_24h_usd: -1.42,
        }
    }

    fn held_btc() -> Vec<Coin> {
        vec![Coin::new("btc", "btc", "Bitcoin", 1, 100.0)
            .with_change_24h(10.0)
            .with_holdings(2.0)]
    }

    #[test]
    fn test_portfolio_change_from_24h_move() {
        let portfolio = held_btc();
        assert_eq!(portfolio_value(&portfolio), 200.0);

        let previous = previous_portfolio_value(&portfolio);
        assert!((previous - 181.818_181).abs() < 1e-3, "previous = {}", previous);

        let change = portfolio_change(&portfolio).unwrap();
        assert!((change - 10.0).abs() < 1e-9, "change = {}", change);
    }

    #[test]
    fn test_missing_change_counts_as_flat() {
        let portfolio = vec![Coin::new("eth", "eth", "Ethereum", 2, 10.0).with_holdings(3.0)];
        assert_eq!(previous_portfolio_value(&portfolio), 30.0);
        assert_eq!(portfolio_change(&portfolio), Some(0.0));
    }

    #[test]
    fn test_empty_portfolio_has_no_change() {
        assert_eq!(portfolio_value(&[]), 0.0);
        assert_eq!(portfolio_change(&[]), None);
    }

    #[test]
    fn test_total_loss_coin_contributes_current_value() {
        let portfolio = vec![
            Coin::new("rug", "rug", "Rug", 900, 0.0).with_change_24h(-100.0).with_holdings(1_000.0),
            Coin::new("eth", "eth", "Ethereum", 2, 10.0).with_change_24h(-150.0).with_holdings(1.0),
        ];
        assert_eq!(previous_portfolio_value(&portfolio), 10.0);
        assert_eq!(portfolio_change(&portfolio), Some(0.0));
    }

    #[test]
    fn test_worthless_holdings_have_no_change() {
        let portfolio = vec![Coin::new("dust", "dust", "Dust", 999, 0.0).with_holdings(5.0)];
        assert_eq!(portfolio_change(&portfolio), None);
    }

    #[test]
    fn test_no_summary_yields_no_statistics() {
        assert!(market_statistics(None, &held_btc()).is_empty());
    }

    #[test]
    fn test_statistics_in_fixed_order() {
        let stats = market_statistics(Some(&summary()), &held_btc());
        let titles: Vec<&str> = stats.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, Statistic::TITLES.to_vec());

        assert_eq!(stats[0].value, "$2.51Tr");
        assert_eq!(stats[0].percentage_change, Some(-1.42));
        assert_eq!(stats[1].value, "$98.00Bn");
        assert_eq!(stats[1].percentage_change, None);
        assert_eq!(stats[2].value, "52.31%");
        assert_eq!(stats[2].percentage_change, None);
        assert_eq!(stats[3].value, "$200.00");
        assert!((stats[3].percentage_change.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_portfolio_still_yields_four() {
        let stats = market_statistics(Some(&summary()), &[]);
        assert_eq!(stats.len(), 4);
        assert_eq!(stats[3].value, "$0.00");
        assert_eq!(stats[3].percentage_change, None);
    }

    #[test]
    fn test_same_inputs_same_output() {
        let summary = summary();
        let portfolio = held_btc();
        assert_eq!(
            market_statistics(Some(&summary), &portfolio),
            market_statistics(Some(&summary), &portfolio)
        );
    }
}
