//! Order domain — lifecycle classification, the order board, and submission.
//!
//! Brokerage orders share the [`TradeRecord`](crate::domain::trade::TradeRecord)
//! shape with disclosure records; what makes them orders is a status string
//! that runs through the lifecycle in [`lifecycle`].

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod lifecycle;
pub mod state;
pub mod wire;

use crate::error::SdkError;
use crate::shared::{Side, Symbol};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use lifecycle::{badge_category, classify, is_cancellable, BadgeCategory, LifecyclePhase};
pub use state::{OrderBoard, ReconcileReport};

// ─── OrderStatusFilter ───────────────────────────────────────────────────────

/// Server-side status filter for the orders list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusFilter {
    #[default]
    All,
    Open,
    Closed,
}

impl OrderStatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatusFilter::All => "all",
            OrderStatusFilter::Open => "open",
            OrderStatusFilter::Closed => "closed",
        }
    }

    /// Unknown-phase orders only show under `All`.
    pub fn matches(&self, phase: LifecyclePhase) -> bool {
        match self {
            OrderStatusFilter::All => true,
            OrderStatusFilter::Open => phase == LifecyclePhase::Open,
            OrderStatusFilter::Closed => phase == LifecyclePhase::Closed,
        }
    }

    /// Whether a view showing this filter should keep polling.
    pub fn is_live(&self) -> bool {
        !matches!(self, OrderStatusFilter::Closed)
    }
}

// ─── OrderType ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
    StopLimit,
}

impl OrderType {
    pub fn needs_limit_price(&self) -> bool {
        matches!(self, OrderType::Limit | OrderType::StopLimit)
    }

    pub fn needs_stop_price(&self) -> bool {
        matches!(self, OrderType::Stop | OrderType::StopLimit)
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OrderType::Market => write!(f, "Market"),
            OrderType::Limit => write!(f, "Limit"),
            OrderType::Stop => write!(f, "Stop"),
            OrderType::StopLimit => write!(f, "Stop Limit"),
        }
    }
}

// ─── TimeInForce ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    #[default]
    Day,
    Gtc,
    Ioc,
    Fok,
}

// ─── OrderRequest ────────────────────────────────────────────────────────────

/// A validated order, ready for `POST /api/orders`.
///
/// Exactly one of `qty` and `notional` is set. Build with [`OrderRequest::builder`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub symbol: Symbol,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub qty: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub notional: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub limit_price: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub stop_price: Option<Decimal>,
    pub client_order_id: String,
}

impl OrderRequest {
    pub fn builder(symbol: impl Into<Symbol>, side: Side) -> OrderRequestBuilder {
        OrderRequestBuilder::new(symbol.into(), side)
    }
}

#[derive(Debug, Clone)]
pub struct OrderRequestBuilder {
    symbol: Symbol,
    side: Side,
    order_type: OrderType,
    time_in_force: TimeInForce,
    qty: Option<Decimal>,
    notional: Option<Decimal>,
    limit_price: Option<Decimal>,
    stop_price: Option<Decimal>,
    client_order_id: Option<String>,
}

impl OrderRequestBuilder {
    fn new(symbol: Symbol, side: Side) -> Self {
        Self {
            symbol,
            side,
            order_type: OrderType::Market,
            time_in_force: TimeInForce::default(),
            qty: None,
            notional: None,
            limit_price: None,
            stop_price: None,
            client_order_id: None,
        }
    }

    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }

    /// Share quantity.
    pub fn qty(mut self, qty: Decimal) -> Self {
        self.qty = Some(qty);
        self
    }

    /// Dollar amount. Market orders only.
    pub fn notional(mut self, notional: Decimal) -> Self {
        self.notional = Some(notional);
        self
    }

    pub fn limit_price(mut self, price: Decimal) -> Self {
        self.limit_price = Some(price);
        self
    }

    pub fn stop_price(mut self, price: Decimal) -> Self {
        self.stop_price = Some(price);
        self
    }

    /// Overrides the generated uuid v4.
    pub fn client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    pub fn build(self) -> Result<OrderRequest, SdkError> {
        let symbol = self.symbol.as_str().trim().to_ascii_uppercase();
        if symbol.is_empty() {
            return Err(SdkError::Validation("Symbol is required".to_string()));
        }

        match (self.qty, self.notional) {
            (Some(_), Some(_)) => {
                return Err(SdkError::Validation(
                    "Specify either qty or notional, not both".to_string(),
                ))
            }
            (None, None) => {
                return Err(SdkError::Validation(
                    "Either qty or notional is required".to_string(),
                ))
            }
            (Some(q), None) if q <= Decimal::ZERO => {
                return Err(SdkError::Validation(format!("qty must be positive, got {}", q)))
            }
            (None, Some(n)) if n <= Decimal::ZERO => {
                return Err(SdkError::Validation(format!(
                    "notional must be positive, got {}",
                    n
                )))
            }
            _ => {}
        }

        if self.notional.is_some() && self.order_type != OrderType::Market {
            return Err(SdkError::Validation(
                "notional orders must be market orders".to_string(),
            ));
        }

        let limit_price = check_price(
            "limitPrice",
            self.limit_price,
            self.order_type.needs_limit_price(),
            self.order_type,
        )?;
        let stop_price = check_price(
            "stopPrice",
            self.stop_price,
            self.order_type.needs_stop_price(),
            self.order_type,
        )?;

        Ok(OrderRequest {
            symbol: Symbol::new(symbol),
            side: self.side,
            order_type: self.order_type,
            time_in_force: self.time_in_force,
            qty: self.qty,
            notional: self.notional,
            limit_price,
            stop_price,
            client_order_id: self
                .client_order_id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        })
    }
}

fn check_price(
    field: &str,
    price: Option<Decimal>,
    required: bool,
    order_type: OrderType,
) -> Result<Option<Decimal>, SdkError> {
    match (price, required) {
        (None, true) => Err(SdkError::Validation(format!(
            "{} is required for {} orders",
            field, order_type
        ))),
        (Some(_), false) => Err(SdkError::Validation(format!(
            "{} is not allowed for {} orders",
            field, order_type
        ))),
        (Some(p), true) if p <= Decimal::ZERO => Err(SdkError::Validation(format!(
            "{} must be positive, got {}",
            field, p
        ))),
        _ => Ok(price),
    }
}
