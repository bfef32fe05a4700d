use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;

use super::market::Market;
use super::price::round_to_cents;
use super::stock::Stock;
use super::transaction::{TradeSide, Transaction};

/// Share counts and the trade log of one user.
///
/// Everything in here is serialized into the state file together with the
/// owning [`User`](super::user::User). Holdings are keyed by symbol; an entry
/// that drops to zero is kept rather than removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Owned quantity per symbol, never negative
    holdings: BTreeMap<String, u32>,

    /// All executed trades, oldest first
    transactions: Vec<Transaction>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a purchase at the stock's current price.
    ///
    /// Returns the cost for the caller to debit. Affordability is the
    /// caller's concern; this only rejects a zero quantity or a holding that
    /// would overflow.
    pub fn buy_stock(&mut self, stock: &Stock, quantity: u32) -> Result<f64, CoreError> {
        validate_quantity(quantity)?;

        let held = self.holding(stock.symbol());
        let new_held = held
            .checked_add(quantity)
            .ok_or(CoreError::InvalidQuantity(quantity))?;

        let cost = round_to_cents(stock.price() * f64::from(quantity));
        self.holdings.insert(stock.symbol().to_string(), new_held);
        self.transactions.push(Transaction::new(
            stock.symbol(),
            quantity,
            stock.price(),
            TradeSide::Buy,
        ));

        debug!("bought {} {} @ {:.2} (cost {:.2})", quantity, stock.symbol(), stock.price(), cost);
        Ok(cost)
    }

    /// Record a sale at the stock's current price.
    ///
    /// Fails with [`CoreError::InsufficientShares`] before touching anything
    /// when fewer than `quantity` shares are held. Returns the proceeds.
    pub fn sell_stock(&mut self, stock: &Stock, quantity: u32) -> Result<f64, CoreError> {
        validate_quantity(quantity)?;

        let held = self.holding(stock.symbol());
        if held < quantity {
            return Err(CoreError::InsufficientShares {
                symbol: stock.symbol().to_string(),
                requested: quantity,
                held,
            });
        }

        let proceeds = round_to_cents(stock.price() * f64::from(quantity));
        self.holdings
            .insert(stock.symbol().to_string(), held - quantity);
        self.transactions.push(Transaction::new(
            stock.symbol(),
            quantity,
            stock.price(),
            TradeSide::Sell,
        ));

        debug!("sold {} {} @ {:.2} (proceeds {:.2})", quantity, stock.symbol(), stock.price(), proceeds);
        Ok(proceeds)
    }

    /// Value every holding at the market's current price.
    ///
    /// A held symbol missing from the market is a data-integrity error, not
    /// a silent zero.
    pub fn calculate_value(&self, market: &Market) -> Result<f64, CoreError> {
        let mut total = 0.0;
        for (symbol, quantity) in &self.holdings {
            let stock = market.require_stock(symbol)?;
            total += stock.price() * f64::from(*quantity);
        }
        Ok(round_to_cents(total))
    }

    /// Shares currently held of `symbol` (0 if never traded).
    #[must_use]
    pub fn holding(&self, symbol: &str) -> u32 {
        self.holdings.get(symbol).copied().unwrap_or(0)
    }

    /// All holding entries in symbol order, including zeroed ones.
    #[must_use]
    pub fn holdings(&self) -> &BTreeMap<String, u32> {
        &self.holdings
    }

    /// The full trade log, oldest first.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Trades for a single symbol, oldest first.
    #[must_use]
    pub fn transactions_for(&self, symbol: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.symbol() == symbol)
            .collect()
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

fn validate_quantity(quantity: u32) -> Result<(), CoreError> {
    if quantity == 0 {
        return Err(CoreError::InvalidQuantity(quantity));
    }
    Ok(())
}
