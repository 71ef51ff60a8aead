//! Wire types for position responses.

use rust_decimal::Decimal;
use serde::Deserialize;

/// `GET /api/positions` element. camelCase from the dashboard backend,
/// snake_case when proxied straight from the broker.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionResponse {
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub symbol: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub qty: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "crate::shared::serde_util::opt_string::deserialize"
    )]
    pub side: Option<String>,
    #[serde(
        default,
        alias = "avg_entry_price",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub avg_entry_price: Option<Decimal>,
    #[serde(
        default,
        alias = "current_price",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub current_price: Option<Decimal>,
    #[serde(
        default,
        alias = "market_value",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub market_value: Option<Decimal>,
    #[serde(
        default,
        alias = "cost_basis",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub cost_basis: Option<Decimal>,
    #[serde(
        default,
        rename = "unrealizedPL",
        alias = "unrealized_pl",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub unrealized_pl: Option<Decimal>,
    #[serde(
        default,
        rename = "unrealizedPLPercent",
        alias = "unrealized_plpc",
        alias = "unrealized_pl_percent",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub unrealized_pl_percent: Option<Decimal>,
    #[serde(
        default,
        alias = "change_today",
        deserialize_with = "crate::shared::serde_util::opt_decimal::deserialize"
    )]
    pub change_today: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_position() {
        let p: PositionResponse = serde_json::from_value(json!({
            "symbol": "AAPL",
            "qty": "10",
            "avgEntryPrice": 150.25,
            "currentPrice": "155.00",
            "marketValue": 1550,
            "unrealizedPL": 47.5,
            "unrealizedPLPercent": 0.0316
        }))
        .unwrap();
        assert_eq!(p.avg_entry_price, Some(Decimal::new(15025, 2)));
        assert_eq!(p.unrealized_pl, Some(Decimal::new(475, 1)));
        assert_eq!(p.unrealized_pl_percent, Some(Decimal::new(316, 4)));
    }

    #[test]
    fn test_snake_case_position() {
        let p: PositionResponse = serde_json::from_value(json!({
            "symbol": "MSFT",
            "qty": "3",
            "avg_entry_price": "400",
            "unrealized_plpc": "-0.01"
        }))
        .unwrap();
        assert_eq!(p.avg_entry_price, Some(Decimal::new(400, 0)));
        assert_eq!(p.unrealized_pl_percent, Some(Decimal::new(-1, 2)));
    }
}
