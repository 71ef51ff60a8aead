//! Position domain — open positions, closing, and portfolio totals.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::domain::order::BadgeCategory;
use crate::shared::Symbol;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use state::{PositionBook, PositionTotals};

/// One open position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: Symbol,
    pub qty: Decimal,
    pub side: Option<String>,
    pub avg_entry_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub market_value: Option<Decimal>,
    pub cost_basis: Option<Decimal>,
    pub unrealized_pl: Option<Decimal>,
    /// Ratio, not percent: `0.05` is 5%.
    pub unrealized_pl_percent: Option<Decimal>,
    pub change_today: Option<Decimal>,
}

impl Position {
    /// Market value, or `qty * current_price` when the backend omits it.
    pub fn effective_market_value(&self) -> Option<Decimal> {
        self.market_value
            .or_else(|| self.current_price.map(|p| p * self.qty))
    }

    /// Unrealized P/L, or derived from entry and current price.
    pub fn effective_unrealized_pl(&self) -> Option<Decimal> {
        self.unrealized_pl.or_else(|| {
            let entry = self.avg_entry_price?;
            let current = self.current_price?;
            Some((current - entry) * self.qty)
        })
    }

    pub fn pl_badge(&self) -> BadgeCategory {
        match self.effective_unrealized_pl() {
            Some(pl) if pl >= Decimal::ZERO => BadgeCategory::Success,
            Some(_) => BadgeCategory::Danger,
            None => BadgeCategory::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Multiple(String, Vec<ValidationError>),
    MissingSymbol,
    MissingQuantity,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Multiple(symbol, errors) => {
                writeln!(f, "Position validation errors ({symbol}):")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            ValidationError::MissingSymbol => write!(f, "Missing symbol"),
            ValidationError::MissingQuantity => write!(f, "Missing quantity"),
        }
    }
}

impl std::error::Error for ValidationError {}
