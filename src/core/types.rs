//! Core types - order-side and order-type tokens sent on the wire

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::Error;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(Error::InvalidParameter(format!("unknown side: {}", other))),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Market,
    Limit,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Market => write!(f, "MARKET"),
            OrderType::Limit => write!(f, "LIMIT"),
        }
    }
}

impl FromStr for OrderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            other => Err(Error::InvalidParameter(format!(
                "unknown order type: {}",
                other
            ))),
        }
    }
}

/// Quote currency assumed when a bare coin is given as a pair.
pub const DEFAULT_QUOTE: &str = "USD";

/// Normalise `"BTC"` to `"BTC/USD"`; pairs that already contain `/` pass through.
pub fn normalize_pair(pair_or_coin: &str) -> String {
    if pair_or_coin.contains('/') {
        pair_or_coin.to_string()
    } else {
        format!("{}/{}", pair_or_coin, DEFAULT_QUOTE)
    }
}
