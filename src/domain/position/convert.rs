//! Conversions from wire types to domain types for positions.

use super::wire::PositionResponse;
use super::{Position, ValidationError};
use crate::shared::Symbol;

impl TryFrom<PositionResponse> for Position {
    type Error = ValidationError;

    fn try_from(p: PositionResponse) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        if p.symbol.is_none() {
            errors.push(ValidationError::MissingSymbol);
        }
        if p.qty.is_none() {
            errors.push(ValidationError::MissingQuantity);
        }
        let (Some(symbol), Some(qty)) = (p.symbol, p.qty) else {
            return Err(match errors.len() {
                1 => errors.remove(0),
                _ => ValidationError::Multiple("unknown".to_string(), errors),
            });
        };

        Ok(Position {
            symbol: Symbol::new(symbol),
            qty,
            side: p.side,
            avg_entry_price: p.avg_entry_price,
            current_price: p.current_price,
            market_value: p.market_value,
            cost_basis: p.cost_basis,
            unrealized_pl: p.unrealized_pl,
            unrealized_pl_percent: p.unrealized_pl_percent,
            change_today: p.change_today,
        })
    }
}

/// Converts a list, dropping (and logging) unusable entries.
pub(crate) fn positions_from_wire(list: Vec<PositionResponse>) -> Vec<Position> {
    list.into_iter()
        .filter_map(|p| match Position::try_from(p) {
            Ok(position) => Some(position),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping invalid position");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_valid_position() {
        let resp = PositionResponse {
            symbol: Some("AAPL".to_string()),
            qty: Some(Decimal::new(5, 0)),
            ..Default::default()
        };
        let p = Position::try_from(resp).unwrap();
        assert_eq!(p.symbol.as_str(), "AAPL");
        assert_eq!(p.qty, Decimal::new(5, 0));
    }

    #[test]
    fn test_missing_fields() {
        let err = Position::try_from(PositionResponse::default()).unwrap_err();
        assert!(matches!(err, ValidationError::Multiple(_, ref e) if e.len() == 2));
        let err = Position::try_from(PositionResponse {
            symbol: Some("AAPL".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingQuantity);
    }

    #[test]
    fn test_invalid_entries_dropped() {
        let list = vec![
            PositionResponse {
                symbol: Some("AAPL".to_string()),
                qty: Some(Decimal::ONE),
                ..Default::default()
            },
            PositionResponse::default(),
        ];
        assert_eq!(positions_from_wire(list).len(), 1);
    }
}
