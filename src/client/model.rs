use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::{Error, Result};

/// Envelope fields shared by the account and trading endpoints.
pub trait ApiResponse {
    fn success(&self) -> bool;
    fn err_msg(&self) -> &str;
}

macro_rules! api_response {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ApiResponse for $ty {
                fn success(&self) -> bool {
                    self.success
                }

                fn err_msg(&self) -> &str {
                    &self.err_msg
                }
            }
        )*
    };
}

api_response!(
    TickerResponse,
    BalanceResponse,
    PendingCountResponse,
    PlaceOrderResponse,
    QueryOrderResponse,
    CancelOrderResponse,
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerTime {
    #[serde(rename = "ServerTime")]
    pub server_time: u64,
}

impl ServerTime {
    /// Server time as signed milliseconds, rejecting values past `i64::MAX`.
    pub fn millis(&self) -> Result<i64> {
        i64::try_from(self.server_time)
            .map_err(|_| Error::Exchange(format!("server time out of range: {}", self.server_time)))
    }

    pub fn datetime(&self) -> Result<DateTime<Utc>> {
        let ms = self.millis()?;
        DateTime::from_timestamp_millis(ms)
            .ok_or_else(|| Error::Exchange(format!("server time out of range: {}", ms)))
    }

    /// Local clock minus server clock, in milliseconds.
    pub fn skew_ms(&self, local: DateTime<Utc>) -> Result<i64> {
        Ok(local.timestamp_millis() - self.millis()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeInfo {
    #[serde(rename = "IsRunning")]
    pub is_running: bool,
    #[serde(rename = "InitialWallet", default)]
    pub initial_wallet: HashMap<String, f64>,
    #[serde(rename = "TradePairs", default)]
    pub trade_pairs: HashMap<String, TradePair>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradePair {
    #[serde(rename = "Coin")]
    pub coin: String,
    #[serde(rename = "CoinFullName", default)]
    pub coin_full_name: String,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "UnitFullName", default)]
    pub unit_full_name: String,
    #[serde(rename = "CanTrade")]
    pub can_trade: bool,
    #[serde(rename = "PricePrecision")]
    pub price_precision: u32,
    #[serde(rename = "AmountPrecision")]
    pub amount_precision: u32,
    #[serde(rename = "MiniOrder")]
    pub mini_order: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerData {
    #[serde(rename = "MaxBid")]
    pub max_bid: f64,
    #[serde(rename = "MinAsk")]
    pub min_ask: f64,
    #[serde(rename = "LastPrice")]
    pub last_price: f64,
    #[serde(rename = "Change")]
    pub change: f64,
    #[serde(rename = "CoinTradeValue")]
    pub coin_trade_value: f64,
    #[serde(rename = "UnitTradeValue")]
    pub unit_trade_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerResponse {
    #[serde(rename = "Success")]
    pub success: bool,
    #[serde(rename = "ErrMsg", default)]
    pub err_msg: String,
    #[serde(rename = "ServerTime", default)]
    pub server_time: u64,
    #[serde(rename = "Data", default)]
    pub data: HashMap<String, TickerData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceInfo {
    #[serde(rename = "Free")]
    pub free: f64,
    #[serde(rename = "Lock")]
    pub lock: f64,
}

impl BalanceInfo {
    pub fn total(&self) -> f64 {
        self.free + self.lock
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    #[serde(rename = "Success")]
    pub success: bool,
    #[serde(rename = "ErrMsg", default)]
    pub err_msg: String,
    #[serde(rename = "SpotWallet", default)]
    pub spot_wallet: HashMap<String, BalanceInfo>,
    #[serde(rename = "MarginWallet", default)]
    pub margin_wallet: HashMap<String, BalanceInfo>,
}

/// `Success: false` here just means nothing is pending; counts default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingCountResponse {
    #[serde(rename = "Success")]
    pub success: bool,
    #[serde(rename = "ErrMsg", default)]
    pub err_msg: String,
    #[serde(rename = "TotalPending", default)]
    pub total_pending: u32,
    #[serde(rename = "OrderPairs", default)]
    pub order_pairs: HashMap<String, u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDetail {
    #[serde(rename = "Pair")]
    pub pair: String,
    #[serde(rename = "OrderID")]
    pub order_id: u64,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "ServerTimeUsage")]
    pub server_time_usage: f64,
    #[serde(rename = "CreateTimestamp")]
    pub create_timestamp: u64,
    #[serde(rename = "FinishTimestamp")]
    pub finish_timestamp: u64,
    #[serde(rename = "Side")]
    pub side: String,
    #[serde(rename = "Type")]
    pub order_type: String,
    #[serde(rename = "StopType")]
    pub stop_type: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "FilledQuantity")]
    pub filled_quantity: f64,
    #[serde(rename = "FilledAverPrice")]
    pub filled_aver_price: f64,
    #[serde(rename = "CoinChange")]
    pub coin_change: f64,
    #[serde(rename = "UnitChange")]
    pub unit_change: f64,
    #[serde(rename = "CommissionCoin")]
    pub commission_coin: String,
    #[serde(rename = "CommissionChargeValue")]
    pub commission_charge_value: f64,
    #[serde(rename = "CommissionPercent")]
    pub commission_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    #[serde(rename = "Success")]
    pub success: bool,
    #[serde(rename = "ErrMsg", default)]
    pub err_msg: String,
    #[serde(rename = "OrderDetail", default)]
    pub order_detail: Option<OrderDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOrderResponse {
    #[serde(rename = "Success")]
    pub success: bool,
    #[serde(rename = "ErrMsg", default)]
    pub err_msg: String,
    #[serde(rename = "OrderMatched", default)]
    pub order_matched: Vec<OrderDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelOrderResponse {
    #[serde(rename = "Success")]
    pub success: bool,
    #[serde(rename = "ErrMsg", default)]
    pub err_msg: String,
    #[serde(rename = "CanceledList", default)]
    pub canceled_list: Vec<u64>,
}
