//! Positions sub-client — list, close one, close all.

use crate::client::TradedeskClient;
use crate::domain::position::convert::positions_from_wire;
use crate::domain::position::{Position, PositionBook};
use crate::error::SdkError;
use crate::shared::Symbol;

pub struct Positions<'a> {
    pub(crate) client: &'a TradedeskClient,
}

impl<'a> Positions<'a> {
    pub async fn list(&self) -> Result<Vec<Position>, SdkError> {
        let resp = self.client.http.get_positions().await?;
        Ok(positions_from_wire(resp))
    }

    /// Refetches into `book`; on failure the held positions stay.
    pub async fn refresh(&self, book: &mut PositionBook) -> Result<(), SdkError> {
        match self.list().await {
            Ok(positions) => {
                book.replace(positions);
                Ok(())
            }
            Err(e) => {
                book.record_error(&e);
                Err(e)
            }
        }
    }

    /// Closes one position, then refetches.
    ///
    /// A failed refetch after a successful close is recorded on the book but
    /// does not fail the close.
    pub async fn close(&self, book: &mut PositionBook, symbol: &Symbol) -> Result<(), SdkError> {
        let http = &self.client.http;
        book.request_close(symbol, |symbol| async move {
            http.close_position(symbol.as_str())
                .await
                .map_err(SdkError::from)
        })
        .await?;
        if let Err(e) = self.refresh(book).await {
            tracing::debug!(error = %e, "Refetch after close failed; close stands");
        }
        Ok(())
    }

    pub async fn close_all(&self, book: &mut PositionBook) -> Result<(), SdkError> {
        let http = &self.client.http;
        book.request_close_all(|| async move {
            http.close_all_positions().await.map_err(SdkError::from)
        })
        .await?;
        if let Err(e) = self.refresh(book).await {
            tracing::debug!(error = %e, "Refetch after close failed; close stands");
        }
        Ok(())
    }
}
