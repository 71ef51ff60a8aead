//! Account domain — brokerage account summary and portfolio reports.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account balances as shown in the summary card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub status: Option<String>,
    pub portfolio_value: Option<Decimal>,
    pub cash: Option<Decimal>,
    pub buying_power: Option<Decimal>,
    pub equity: Option<Decimal>,
    pub last_equity: Option<Decimal>,
    pub daytrade_count: Option<u32>,
}

impl AccountSummary {
    pub fn is_active(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("active"))
    }

    /// Equity change since the previous close.
    pub fn day_change(&self) -> Option<Decimal> {
        Some(self.equity? - self.last_equity?)
    }

    /// Day change as a percent of the previous close.
    pub fn day_change_percent(&self) -> Option<Decimal> {
        let last = self.last_equity.filter(|l| !l.is_zero())?;
        Some(self.day_change()? / last * Decimal::ONE_HUNDRED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_change() {
        let summary = AccountSummary {
            status: Some("ACTIVE".to_string()),
            equity: Some(Decimal::new(10500, 0)),
            last_equity: Some(Decimal::new(10000, 0)),
            ..Default::default()
        };
        assert!(summary.is_active());
        assert_eq!(summary.day_change(), Some(Decimal::new(500, 0)));
        assert_eq!(summary.day_change_percent(), Some(Decimal::new(5, 0)));
    }

    #[test]
    fn test_day_change_needs_both_sides() {
        let summary = AccountSummary {
            equity: Some(Decimal::ONE),
            last_equity: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert_eq!(summary.day_change_percent(), None);
        assert_eq!(AccountSummary::default().day_change(), None);
    }
}
