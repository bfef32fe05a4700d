use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::CoreError;

/// Default location of the saved user state, relative to the working directory.
pub const DEFAULT_STATE_PATH: &str = "portfolio.dat";

/// One opening listing of the simulated market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockListing {
    pub symbol: String,
    pub name: String,
    /// Opening price in dollars
    pub price: f64,
}

impl StockListing {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
            price,
        }
    }
}

/// Session configuration: who the fresh user is, what the market lists, and
/// where state is kept. Any field missing from a settings file takes its
/// default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name given to a freshly created user
    pub user_name: String,

    /// Cash a freshly created user starts with
    pub starting_balance: f64,

    /// Where the user state file lives
    pub state_path: String,

    /// Opening market listings
    pub stocks: Vec<StockListing>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_name: "Alice".to_string(),
            starting_balance: 10_000.0,
            state_path: DEFAULT_STATE_PATH.to_string(),
            stocks: vec![
                StockListing::new("AAPL", "Apple Inc.", 150.0),
                StockListing::new("GOOGL", "Alphabet Inc.", 2800.0),
                StockListing::new("TSLA", "Tesla Inc.", 700.0),
            ],
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Check that the settings describe a usable session.
    ///
    /// Rules:
    /// - Starting balance must be finite and non-negative
    /// - The market must list at least one stock
    /// - Symbols must be non-empty and unique (case-insensitive)
    /// - Opening prices must be finite and positive
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.starting_balance.is_finite() || self.starting_balance < 0.0 {
            return Err(CoreError::Config(format!(
                "starting balance must be non-negative, got {}",
                self.starting_balance
            )));
        }
        if self.stocks.is_empty() {
            return Err(CoreError::Config("market must list at least one stock".into()));
        }

        let mut seen = HashSet::new();
        for listing in &self.stocks {
            let symbol = listing.symbol.trim().to_uppercase();
            if symbol.is_empty() {
                return Err(CoreError::Config("stock symbol must not be empty".into()));
            }
            if !seen.insert(symbol.clone()) {
                return Err(CoreError::Config(format!("duplicate stock symbol: {symbol}")));
            }
            if !listing.price.is_finite() || listing.price <= 0.0 {
                return Err(CoreError::Config(format!(
                    "opening price of {symbol} must be positive, got {}",
                    listing.price
                )));
            }
        }
        Ok(())
    }
}
