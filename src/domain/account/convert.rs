//! Conversions from wire types to domain types for the account.

use super::wire::AccountResponse;
use super::AccountSummary;
use rust_decimal::prelude::ToPrimitive;

impl From<AccountResponse> for AccountSummary {
    fn from(a: AccountResponse) -> Self {
        Self {
            status: a.status,
            portfolio_value: a.portfolio_value,
            cash: a.cash,
            buying_power: a.buying_power,
            equity: a.equity,
            last_equity: a.last_equity,
            daytrade_count: a.daytrade_count.and_then(|d| d.trunc().to_u32()),
        }
    }
}
