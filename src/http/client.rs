//! Low-level HTTP client — `TradedeskHttp`.
//!
//! One method per backend endpoint. Returns wire types (conversion to domain
//! types happens in the sub-clients). Endpoints whose payload shape varies
//! return `serde_json::Value` so the caller can run a tagged decode.

use crate::domain::account::wire::AccountResponse;
use crate::domain::market::wire::{
    ChartPointResponse, MarketOverviewResponse, RecommendationsResponse, StockSnapshotResponse,
    WatchlistStockResponse,
};
use crate::domain::order::{OrderRequest, OrderStatusFilter};
use crate::domain::position::wire::PositionResponse;
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;
use crate::shared::Timeframe;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct PageQuery {
    page: u32,
    page_size: u32,
}

#[derive(Serialize)]
struct StatusQuery<'a> {
    status: &'a str,
}

#[derive(Serialize)]
struct TimeframeQuery<'a> {
    timeframe: &'a str,
}

/// Low-level HTTP client for the dashboard REST API.
#[derive(Clone)]
pub struct TradedeskHttp {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl TradedeskHttp {
    pub fn new(base_url: &str) -> Self {
        Self::with_options(base_url, DEFAULT_TIMEOUT, RetryPolicy::None)
    }

    pub fn with_options(base_url: &str, timeout: Duration, retry: RetryPolicy) -> Self {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            retry,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn query<Q: Serialize>(path: String, query: &Q) -> Result<String, HttpError> {
        let qs = serde_urlencoded::to_string(query)
            .map_err(|e| HttpError::BadRequest(format!("Invalid query: {}", e)))?;
        Ok(format!("{}?{}", path, qs))
    }

    // ── Trade feed ───────────────────────────────────────────────────────

    /// One page of the disclosure trade feed, undecoded.
    pub async fn get_trade_feed(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<serde_json::Value, HttpError> {
        let url = Self::query(
            self.url("/api/congressman-trades"),
            &PageQuery { page, page_size },
        )?;
        self.get(&url).await
    }

    // ── Orders ───────────────────────────────────────────────────────────

    pub async fn get_orders(
        &self,
        status: OrderStatusFilter,
    ) -> Result<serde_json::Value, HttpError> {
        let url = Self::query(
            self.url("/api/orders"),
            &StatusQuery {
                status: status.as_str(),
            },
        )?;
        self.get(&url).await
    }

    pub async fn submit_order(
        &self,
        request: &OrderRequest,
    ) -> Result<serde_json::Value, HttpError> {
        let url = self.url("/api/orders");
        // Submissions are never replayed, whatever the client policy says.
        self.send(reqwest::Method::POST, &url, Some(request), &RetryPolicy::None)
            .await
            .and_then(|body| parse_body(&url, &body))
    }

    pub async fn cancel_order(&self, order_id: &str) -> Result<(), HttpError> {
        let url = self.url(&format!("/api/orders/{}", urlencoding::encode(order_id)));
        self.delete(&url).await
    }

    // ── Positions ────────────────────────────────────────────────────────

    pub async fn get_positions(&self) -> Result<Vec<PositionResponse>, HttpError> {
        self.get(&self.url("/api/positions")).await
    }

    pub async fn close_position(&self, symbol: &str) -> Result<(), HttpError> {
        let url = self.url(&format!("/api/positions/{}", urlencoding::encode(symbol)));
        self.delete(&url).await
    }

    pub async fn close_all_positions(&self) -> Result<(), HttpError> {
        self.delete(&self.url("/api/positions")).await
    }

    // ── Account ──────────────────────────────────────────────────────────

    pub async fn get_account(&self) -> Result<AccountResponse, HttpError> {
        self.get(&self.url("/api/account")).await
    }

    pub async fn get_portfolio_summary(&self) -> Result<serde_json::Value, HttpError> {
        self.get(&self.url("/api/portfolio/summary")).await
    }

    pub async fn get_portfolio_history(&self) -> Result<serde_json::Value, HttpError> {
        self.get(&self.url("/api/portfolio/history")).await
    }

    // ── Market ───────────────────────────────────────────────────────────

    pub async fn get_market_overview(&self) -> Result<MarketOverviewResponse, HttpError> {
        self.get(&self.url("/api/market/overview")).await
    }

    pub async fn get_watchlist(&self) -> Result<Vec<WatchlistStockResponse>, HttpError> {
        self.get(&self.url("/api/market/watchlist")).await
    }

    pub async fn get_recommendations(&self) -> Result<RecommendationsResponse, HttpError> {
        self.get(&self.url("/api/recommendations")).await
    }

    // ── Stocks ───────────────────────────────────────────────────────────

    pub async fn get_stock(&self, symbol: &str) -> Result<StockSnapshotResponse, HttpError> {
        let url = self.url(&format!("/api/stocks/{}", urlencoding::encode(symbol)));
        self.get(&url).await
    }

    pub async fn get_stock_chart(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<ChartPointResponse>, HttpError> {
        let url = Self::query(
            self.url(&format!("/api/stocks/{}/chart", urlencoding::encode(symbol))),
            &TimeframeQuery {
                timeframe: timeframe.as_str(),
            },
        )?;
        self.get(&url).await
    }

    pub async fn get_stock_news(&self, symbol: &str) -> Result<serde_json::Value, HttpError> {
        let url = self.url(&format!("/api/stocks/{}/news", urlencoding::encode(symbol)));
        self.get(&url).await
    }

    pub async fn get_stock_yahoo(&self, symbol: &str) -> Result<serde_json::Value, HttpError> {
        let url = self.url(&format!("/api/stocks/{}/yahoo", urlencoding::encode(symbol)));
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let body = self
            .send(reqwest::Method::GET, url, None::<&()>, &self.retry)
            .await?;
        parse_body(url, &body)
    }

    /// DELETE endpoints answer 2xx with an empty or irrelevant body.
    async fn delete(&self, url: &str) -> Result<(), HttpError> {
        self.send(reqwest::Method::DELETE, url, None::<&()>, &RetryPolicy::None)
            .await
            .map(|_| ())
    }

    async fn send<B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: &RetryPolicy,
    ) -> Result<String, HttpError> {
        let Some(config) = retry.config() else {
            return self.do_request(&method, url, body).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => config.is_retryable_status(*status),
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            config.is_retryable_status(429)
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            #[cfg(not(target_arch = "wasm32"))]
                            let retryable = re.is_connect() || re.is_timeout() || re.is_request();
                            #[cfg(target_arch = "wasm32")]
                            let retryable = re.is_timeout() || re.is_request();
                            retryable
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying {} {}",
                            method,
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<String, HttpError> {
        tracing::trace!("{} {}", method, url);
        let mut req = self
            .client
            .request(method.clone(), url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Reqwest(e)
            }
        })?;
        let status = resp.status();
        let body_text = resp.text().await?;

        if status.is_success() {
            return Ok(body_text);
        }

        let status_code = status.as_u16();
        tracing::warn!(status = status_code, "{} {} failed", method, url);

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(error_message(&body_text))),
            429 => Err(HttpError::RateLimited {
                retry_after_ms: None,
            }),
            400..=499 => Err(HttpError::BadRequest(error_message(&body_text))),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: error_message(&body_text),
            }),
        }
    }
}

fn parse_body<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, HttpError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, "Undecodable response from {}", url);
        HttpError::InvalidBody(e.to_string())
    })
}

/// Extracts `{"error": "..."}` / `{"message": "..."}` from an error body,
/// falling back to the raw text.
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        #[serde(alias = "message")]
        error: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| body.to_string())
}
