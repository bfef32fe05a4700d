use rand::Rng;
use serde::{Deserialize, Serialize};

use super::price;

/// A listed instrument in the simulated market.
///
/// Symbol and name are fixed at construction; only the price moves, once per
/// round, through [`Stock::update_price`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    /// Ticker symbol, uppercased (e.g., "AAPL", "TSLA")
    symbol: String,

    /// Human-readable name (e.g., "Apple Inc.")
    name: String,

    /// Current price, rounded to cents
    price: f64,
}

impl Stock {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
            price: price::round_to_cents(price.max(0.0)),
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Move the price by a uniform random percentage in [-5%, +5%].
    /// Returns the percentage that was applied.
    pub fn update_price<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let change = price::random_change_percent(rng);
        self.price = price::apply_change(self.price, change);
        change
    }
}

impl std::fmt::Display for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} : ${:.2}", self.symbol, self.name, self.price)
    }
}
