//! Wire types for account responses.

use rust_decimal::Decimal;
use serde::Deserialize;

/// `GET /api/account`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub status: Option<String>,
    #[serde(
        default,
        alias = "portfolio_value",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub portfolio_value: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub cash: Option<Decimal>,
    #[serde(
        default,
        alias = "buying_power",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub buying_power: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub equity: Option<Decimal>,
    #[serde(
        default,
        alias = "last_equity",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub last_equity: Option<Decimal>,
    #[serde(
        default,
        alias = "daytrade_count",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub daytrade_count: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_response_both_casings() {
        let a: AccountResponse = serde_json::from_value(json!({
            "status": "ACTIVE",
            "portfolioValue": "25000.50",
            "buying_power": 50000,
            "daytradeCount": 2
        }))
        .unwrap();
        assert_eq!(a.portfolio_value, Some(Decimal::new(2500050, 2)));
        assert_eq!(a.buying_power, Some(Decimal::new(50000, 0)));
        assert_eq!(a.daytrade_count, Some(Decimal::new(2, 0)));
    }
}
