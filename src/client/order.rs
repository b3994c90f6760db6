//! Parameter builders for the trading endpoints.

use rust_decimal::Decimal;

use crate::core::{Error, OrderType, Result, Side, normalize_pair};
use crate::signer::Params;

/// New order for `POST /v3/place_order`
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub pair: String,
    pub side: Side,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    /// Inferred from `price` when unset.
    pub order_type: Option<OrderType>,
}

impl OrderRequest {
    pub fn market(pair: &str, side: Side, quantity: Decimal) -> Self {
        Self {
            pair: normalize_pair(pair),
            side,
            quantity,
            price: None,
            order_type: Some(OrderType::Market),
        }
    }

    pub fn limit(pair: &str, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            pair: normalize_pair(pair),
            side,
            quantity,
            price: Some(price),
            order_type: Some(OrderType::Limit),
        }
    }

    /// LIMIT when a price is present, MARKET otherwise, unless set explicitly.
    pub fn order_type(&self) -> OrderType {
        self.order_type.unwrap_or(if self.price.is_some() {
            OrderType::Limit
        } else {
            OrderType::Market
        })
    }

    pub fn to_params(&self) -> Result<Params> {
        if self.quantity <= Decimal::ZERO {
            return Err(Error::InvalidParameter(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }

        let order_type = self.order_type();
        let mut params = Params::new()
            .with("pair", normalize_pair(&self.pair))
            .with("side", self.side)
            .with("type", order_type)
            .with("quantity", self.quantity);

        if order_type == OrderType::Limit {
            let price = self.price.ok_or_else(|| {
                Error::InvalidParameter("LIMIT orders require a price".to_string())
            })?;
            if price <= Decimal::ZERO {
                return Err(Error::InvalidParameter(format!(
                    "price must be positive, got {}",
                    price
                )));
            }
            params.insert("price", price);
        }

        Ok(params)
    }
}

/// Selection for `POST /v3/query_order`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderQuery {
    /// Every order on the account
    All,
    Id(u64),
    Pair {
        pair: String,
        pending_only: Option<bool>,
    },
}

impl OrderQuery {
    pub fn to_params(&self) -> Params {
        match self {
            OrderQuery::All => Params::new(),
            OrderQuery::Id(id) => Params::new().with("order_id", id),
            OrderQuery::Pair { pair, pending_only } => {
                let mut params = Params::new().with("pair", normalize_pair(pair));
                if let Some(pending) = pending_only {
                    params.insert("pending_only", if *pending { "TRUE" } else { "FALSE" });
                }
                params
            }
        }
    }
}

/// Selection for `POST /v3/cancel_order`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelTarget {
    /// Every pending order on the account
    All,
    Id(u64),
    Pair(String),
}

impl CancelTarget {
    pub fn to_params(&self) -> Params {
        match self {
            CancelTarget::All => Params::new(),
            CancelTarget::Id(id) => Params::new().with("order_id", id),
            CancelTarget::Pair(pair) => Params::new().with("pair", normalize_pair(pair)),
        }
    }
}
