use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::market::Market;
use super::portfolio::Portfolio;
use super::price::round_to_cents;
use super::stock::Stock;

/// The account holder: a cash balance and one portfolio.
///
/// This is the whole persisted state of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    name: String,

    /// Cash available for purchases, never negative after a buy
    balance: f64,

    portfolio: Portfolio,
}

impl User {
    pub fn new(name: impl Into<String>, balance: f64) -> Self {
        Self {
            name: name.into(),
            balance: round_to_cents(balance),
            portfolio: Portfolio::new(),
        }
    }

    /// Buy `quantity` shares at the stock's current price.
    ///
    /// Rejects with [`CoreError::InsufficientBalance`] when the cost exceeds
    /// the balance; nothing changes on any error.
    pub fn buy(&mut self, stock: &Stock, quantity: u32) -> Result<(), CoreError> {
        let cost = round_to_cents(stock.price() * f64::from(quantity));
        if self.balance < cost {
            return Err(CoreError::InsufficientBalance {
                required: cost,
                available: self.balance,
            });
        }
        let cost = self.portfolio.buy_stock(stock, quantity)?;
        self.balance = round_to_cents(self.balance - cost);
        Ok(())
    }

    /// Sell `quantity` shares at the stock's current price and credit the
    /// proceeds. Share sufficiency is checked by the portfolio.
    pub fn sell(&mut self, stock: &Stock, quantity: u32) -> Result<(), CoreError> {
        let proceeds = self.portfolio.sell_stock(stock, quantity)?;
        self.balance = round_to_cents(self.balance + proceeds);
        Ok(())
    }

    /// Cash plus the market value of all holdings.
    pub fn net_worth(&self, market: &Market) -> Result<f64, CoreError> {
        let value = self.portfolio.calculate_value(market)?;
        Ok(round_to_cents(self.balance + value))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn balance(&self) -> f64 {
        self.balance
    }

    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }
}
