use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    /// Shares acquired, cash debited
    Buy,
    /// Shares disposed of, cash credited
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// A single executed trade in the portfolio log.
///
/// Stocks are referenced by symbol only, so a restored log never depends on
/// the market instance it was recorded against. The price is the snapshot
/// price at the moment of the trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    id: Uuid,

    symbol: String,

    /// Shares traded (always positive)
    quantity: u32,

    /// Price per share at execution
    price: f64,

    side: TradeSide,

    /// Capture time, set at construction
    timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(symbol: impl Into<String>, quantity: u32, price: f64, side: TradeSide) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            quantity,
            price,
            side,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[must_use]
    pub fn side(&self) -> TradeSide {
        self.side
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Cash value of the trade (price × quantity).
    #[must_use]
    pub fn total(&self) -> f64 {
        super::price::round_to_cents(self.price * f64::from(self.quantity))
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | Qty: {} | Price: ${:.2}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.side,
            self.symbol,
            self.quantity,
            self.price
        )
    }
}
