//! Account sub-client — summary and portfolio reports.

use crate::client::TradedeskClient;
use crate::domain::account::AccountSummary;
use crate::error::SdkError;

pub struct Account<'a> {
    pub(crate) client: &'a TradedeskClient,
}

impl<'a> Account<'a> {
    pub async fn get(&self) -> Result<AccountSummary, SdkError> {
        Ok(self.client.http.get_account().await?.into())
    }

    /// Portfolio summary, passed through undecoded.
    pub async fn portfolio_summary(&self) -> Result<serde_json::Value, SdkError> {
        Ok(self.client.http.get_portfolio_summary().await?)
    }

    /// Portfolio value history, passed through undecoded.
    pub async fn portfolio_history(&self) -> Result<serde_json::Value, SdkError> {
        Ok(self.client.http.get_portfolio_history().await?)
    }
}
