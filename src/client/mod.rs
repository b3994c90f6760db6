//! Roostoo REST client
//!
//! Thin call sites over the signing protocol. Signed GETs carry the signed
//! parameter set as the query string; signed POSTs carry the canonical string
//! as a form-encoded body. Each call is one-shot: no retries, no session.

pub mod model;
pub mod order;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::{DEFAULT_BASE_URL, ExchangeConfig};
use crate::core::{Error, Result};
use crate::signer::{Credentials, Params, RequestSigner, TIMESTAMP_KEY};

pub use model::*;
pub use order::{CancelTarget, OrderQuery, OrderRequest};

/// Client for the Roostoo trading API
#[derive(Debug, Clone)]
pub struct RoostooClient {
    base_url: String,
    signer: RequestSigner,
    client: Client,
}

impl RoostooClient {
    /// Client against the public mock exchange, signing with the system clock.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_signer(RequestSigner::new(credentials), DEFAULT_BASE_URL)
    }

    pub fn with_signer(signer: RequestSigner, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: trim_base(base_url.into()),
            signer,
            client: Client::builder().build()?,
        })
    }

    pub fn from_config(config: &ExchangeConfig) -> Result<Self> {
        Self::configured(config, config.credentials()?)
    }

    /// Like [`RoostooClient::from_config`], but missing credentials are not an
    /// error: an empty pair is used, enough for the unsigned endpoints.
    pub fn public_from_config(config: &ExchangeConfig) -> Result<Self> {
        let credentials = match config.credentials() {
            Ok(credentials) => credentials,
            Err(e) => {
                debug!("{}; signed endpoints unavailable", e);
                Credentials::new("", "")
            }
        };
        Self::configured(config, credentials)
    }

    fn configured(config: &ExchangeConfig, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: trim_base(config.base_url.clone()),
            signer: RequestSigner::new(credentials),
            client,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base(base_url.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// Check server time
    /// GET /v3/serverTime
    pub async fn server_time(&self) -> Result<ServerTime> {
        self.public_get("/v3/serverTime", None).await
    }

    /// Exchange information
    /// GET /v3/exchangeInfo
    pub async fn exchange_info(&self) -> Result<ExchangeInfo> {
        self.public_get("/v3/exchangeInfo", None).await
    }

    /// Market ticker, for one pair or all of them. Timestamped, not signed.
    /// GET /v3/ticker
    pub async fn ticker(&self, pair: Option<&str>) -> Result<TickerResponse> {
        let mut params = Params::new().with(TIMESTAMP_KEY, self.signer.timestamp_ms()?);
        if let Some(p) = pair {
            params.insert("pair", crate::core::normalize_pair(p));
        }

        let resp: TickerResponse = self.public_get("/v3/ticker", Some(&params)).await?;
        ensure_success(resp)
    }

    /// Balance information
    /// GET /v3/balance
    pub async fn balance(&self) -> Result<BalanceResponse> {
        let resp: BalanceResponse = self.signed_get("/v3/balance", Params::new()).await?;
        ensure_success(resp)
    }

    /// Pending order count
    /// GET /v3/pending_count
    pub async fn pending_count(&self) -> Result<PendingCountResponse> {
        let resp: PendingCountResponse = self.signed_get("/v3/pending_count", Params::new()).await?;
        if !resp.success {
            debug!("pending_count: {}", resp.err_msg);
        }
        Ok(resp)
    }

    /// New order (Trade)
    /// POST /v3/place_order
    pub async fn place_order(&self, order: &OrderRequest) -> Result<PlaceOrderResponse> {
        let params = order.to_params()?;
        info!(
            "Placing order: {} {} {} @ {:?}",
            order.side,
            order.quantity,
            order.pair,
            order.price
        );

        let resp: PlaceOrderResponse = self.signed_post("/v3/place_order", params).await?;
        let resp = ensure_success(resp)?;
        if let Some(detail) = &resp.order_detail {
            info!("Order {} {}", detail.order_id, detail.status);
        }
        Ok(resp)
    }

    /// Query order
    /// POST /v3/query_order
    pub async fn query_order(&self, query: &OrderQuery) -> Result<QueryOrderResponse> {
        let resp: QueryOrderResponse = self.signed_post("/v3/query_order", query.to_params()).await?;
        ensure_success(resp)
    }

    /// Cancel order
    /// POST /v3/cancel_order
    pub async fn cancel_order(&self, target: &CancelTarget) -> Result<CancelOrderResponse> {
        let resp: CancelOrderResponse =
            self.signed_post("/v3/cancel_order", target.to_params()).await?;
        let resp = ensure_success(resp)?;
        info!("Canceled {} order(s)", resp.canceled_list.len());
        Ok(resp)
    }

    async fn public_get<T: DeserializeOwned>(&self, path: &str, query: Option<&Params>) -> Result<T> {
        let mut req = self.client.get(self.url(path));
        if let Some(q) = query {
            req = req.query(q);
        }

        debug!("GET {}", path);
        let resp = req.send().await?;
        read_json(path, resp).await
    }

    /// Signed GET: signed parameter set as query string, auth headers.
    async fn signed_get<T: DeserializeOwned>(&self, path: &str, params: Params) -> Result<T> {
        let signed = self.signer.sign(params)?;
        let headers = signed.get_headers()?;

        debug!("GET {} (signed, ts={:?})", path, signed.timestamp());
        let resp = self
            .client
            .get(self.url(path))
            .query(signed.query())
            .headers(headers)
            .send()
            .await?;

        read_json(path, resp).await
    }

    /// Signed POST: canonical string as the form-encoded body, auth headers.
    async fn signed_post<T: DeserializeOwned>(&self, path: &str, params: Params) -> Result<T> {
        let signed = self.signer.sign(params)?;
        let headers = signed.post_headers()?;

        debug!("POST {} (signed, ts={:?})", path, signed.timestamp());
        let resp = self
            .client
            .post(self.url(path))
            .headers(headers)
            .body(signed.canonical)
            .send()
            .await?;

        read_json(path, resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn trim_base(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

async fn read_json<T: DeserializeOwned>(path: &str, resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        warn!("{} failed: HTTP {}", path, status);
        return Err(Error::Http {
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(serde_json::from_str(&text)?)
}

fn ensure_success<R: ApiResponse>(resp: R) -> Result<R> {
    if resp.success() {
        Ok(resp)
    } else {
        Err(Error::Exchange(resp.err_msg().to_string()))
    }
}
