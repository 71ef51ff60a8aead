//! Position state containers — app-owned, SDK-provided update logic.

use super::Position;
use crate::error::SdkError;
use crate::shared::Symbol;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::future::Future;

/// Portfolio-level sums over the held positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionTotals {
    pub market_value: Decimal,
    pub unrealized_pl: Decimal,
    pub cost_basis: Decimal,
}

/// The positions table for one view, with per-symbol close tracking.
///
/// A position is removed only once its close request succeeds.
#[derive(Debug, Clone, Default)]
pub struct PositionBook {
    positions: Vec<Position>,
    closing: HashSet<Symbol>,
    closing_all: bool,
    last_error: Option<String>,
}

impl PositionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the held positions with a fresh list.
    pub fn replace(&mut self, positions: Vec<Position>) {
        self.closing
            .retain(|s| positions.iter().any(|p| &p.symbol == s));
        self.positions = positions;
        self.last_error = None;
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Position> {
        self.positions.iter().find(|p| &p.symbol == symbol)
    }

    pub fn is_closing(&self, symbol: &Symbol) -> bool {
        self.closing_all || self.closing.contains(symbol)
    }

    pub fn is_closing_all(&self) -> bool {
        self.closing_all
    }

    pub fn begin_close(&mut self, symbol: &Symbol) -> Result<(), SdkError> {
        if self.get(symbol).is_none() {
            return Err(SdkError::Validation(format!("No open position in {}", symbol)));
        }
        if self.closing_all {
            return Err(SdkError::Validation(
                "All positions are already being closed".to_string(),
            ));
        }
        if !self.closing.insert(symbol.clone()) {
            return Err(SdkError::Validation(format!(
                "Position {} is already closing",
                symbol
            )));
        }
        Ok(())
    }

    pub fn finish_close(&mut self, symbol: &Symbol) {
        self.closing.remove(symbol);
        self.positions.retain(|p| &p.symbol != symbol);
        tracing::info!(symbol = %symbol, "Position closed");
    }

    pub fn abort_close(&mut self, symbol: &Symbol, error: &SdkError) {
        self.closing.remove(symbol);
        self.last_error = Some(error.user_message());
        tracing::warn!(symbol = %symbol, error = %error, "Position close failed");
    }

    pub fn begin_close_all(&mut self) -> Result<(), SdkError> {
        if self.positions.is_empty() {
            return Err(SdkError::Validation("No open positions".to_string()));
        }
        if self.closing_all || !self.closing.is_empty() {
            return Err(SdkError::Validation(
                "A close is already in flight".to_string(),
            ));
        }
        self.closing_all = true;
        Ok(())
    }

    pub fn finish_close_all(&mut self) {
        self.closing_all = false;
        let count = self.positions.len();
        self.positions.clear();
        tracing::info!(count, "All positions closed");
    }

    pub fn abort_close_all(&mut self, error: &SdkError) {
        self.closing_all = false;
        self.last_error = Some(error.user_message());
        tracing::warn!(error = %error, "Close all positions failed");
    }

    /// Gates, sends, and applies a single close.
    pub async fn request_close<F, Fut>(&mut self, symbol: &Symbol, send: F) -> Result<(), SdkError>
    where
        F: FnOnce(Symbol) -> Fut,
        Fut: Future<Output = Result<(), SdkError>>,
    {
        self.begin_close(symbol)?;
        match send(symbol.clone()).await {
            Ok(()) => {
                self.finish_close(symbol);
                Ok(())
            }
            Err(e) => {
                self.abort_close(symbol, &e);
                Err(e)
            }
        }
    }

    pub async fn request_close_all<F, Fut>(&mut self, send: F) -> Result<(), SdkError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), SdkError>>,
    {
        self.begin_close_all()?;
        match send().await {
            Ok(()) => {
                self.finish_close_all();
                Ok(())
            }
            Err(e) => {
                self.abort_close_all(&e);
                Err(e)
            }
        }
    }

    pub fn totals(&self) -> PositionTotals {
        self.positions
            .iter()
            .fold(PositionTotals::default(), |mut acc, p| {
                acc.market_value += p.effective_market_value().unwrap_or_default();
                acc.unrealized_pl += p.effective_unrealized_pl().unwrap_or_default();
                acc.cost_basis += p
                    .cost_basis
                    .or_else(|| p.avg_entry_price.map(|e| e * p.qty))
                    .unwrap_or_default();
                acc
            })
    }

    pub fn record_error(&mut self, error: &SdkError) {
        tracing::warn!(error = %error, "Positions refresh failed");
        self.last_error = Some(error.user_message());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
