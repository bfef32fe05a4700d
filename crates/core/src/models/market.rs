use log::debug;
use rand::Rng;
use std::collections::BTreeMap;

use crate::errors::CoreError;

use super::settings::Settings;
use super::stock::Stock;

/// The in-memory set of tradable stocks.
///
/// Not persisted: the market is rebuilt from [`Settings`] every run while the
/// user state is restored from disk. Stocks are kept in symbol order so a
/// seeded RNG produces the same round every time.
#[derive(Debug, Clone, Default)]
pub struct Market {
    stocks: BTreeMap<String, Stock>,
}

impl Market {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the opening market from the configured listings.
    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let mut market = Self::new();
        for listing in &settings.stocks {
            market.add_stock(Stock::new(listing.symbol.trim(), &listing.name, listing.price));
        }
        Ok(market)
    }

    /// Insert a stock, replacing any existing one with the same symbol.
    /// Returns the replaced stock, if any.
    pub fn add_stock(&mut self, stock: Stock) -> Option<Stock> {
        self.stocks.insert(stock.symbol().to_string(), stock)
    }

    #[must_use]
    pub fn get_stock(&self, symbol: &str) -> Option<&Stock> {
        self.stocks.get(symbol)
    }

    /// Like [`Market::get_stock`], but an absent symbol is an error.
    pub fn require_stock(&self, symbol: &str) -> Result<&Stock, CoreError> {
        self.get_stock(symbol)
            .ok_or_else(|| CoreError::UnknownSymbol(symbol.to_string()))
    }

    /// Advance every price by one round.
    pub fn simulate_price_changes<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for stock in self.stocks.values_mut() {
            let change = stock.update_price(rng);
            debug!("{} moved {:+.2}% to {:.2}", stock.symbol(), change, stock.price());
        }
    }

    /// All stocks in symbol order, for listing.
    pub fn stocks(&self) -> impl Iterator<Item = &Stock> {
        self.stocks.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}
