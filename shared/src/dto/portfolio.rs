//! # Portfolio DTOs

use serde::{Deserialize, Serialize};

/// A saved holding: which coin, and how much of it.
///
/// `amount: None` means "not held"; the portfolio join skips such entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioEntry {
    pub coin_id: String,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl PortfolioEntry {
    pub fn new(coin_id: impl Into<String>, amount: f64) -> Self {
        Self {
            coin_id: coin_id.into(),
            amount: Some(amount),
        }
    }
}
