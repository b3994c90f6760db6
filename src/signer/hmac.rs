//! HMAC-SHA256 request signer
//!
//! Every signed call goes through [`RequestSigner::sign`]:
//! stamp `timestamp`, build the canonical string, MAC it with the secret,
//! and hand back the header pair together with the finalized parameters.

use hmac::{Hmac, Mac};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use sha2::Sha256;
use std::sync::Arc;
use tracing::debug;

use crate::core::{Error, Result};
use crate::signer::clock::{Clock, SystemClock};
use crate::signer::credentials::Credentials;
use crate::signer::params::{Params, TIMESTAMP_KEY};

type HmacSha256 = Hmac<Sha256>;

pub const API_KEY_HEADER: &str = "RST-API-KEY";
pub const SIGNATURE_HEADER: &str = "MSG-SIGNATURE";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// `RST-API-KEY` / `MSG-SIGNATURE` values for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    api_key: String,
    signature: String,
}

impl AuthHeaders {
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Lowercase hex HMAC-SHA256 digest.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Wire name / value pairs.
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [
            (API_KEY_HEADER, self.api_key.as_str()),
            (SIGNATURE_HEADER, self.signature.as_str()),
        ]
    }

    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.pairs() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Auth(format!("invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::Auth(format!("invalid value for {}: {}", name, e)))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

/// Output of the signer: auth headers, the parameters actually signed
/// (timestamp included) and the exact string the MAC covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub headers: AuthHeaders,
    pub params: Params,
    pub canonical: String,
}

impl SignedRequest {
    pub fn timestamp(&self) -> Option<&str> {
        self.params.get(TIMESTAMP_KEY)
    }

    /// Query parameters for a GET call.
    pub fn query(&self) -> &Params {
        &self.params
    }

    /// Literal body for a POST call.
    pub fn body(&self) -> &str {
        &self.canonical
    }

    /// Headers for a GET call.
    pub fn get_headers(&self) -> Result<HeaderMap> {
        self.headers.to_header_map()
    }

    /// Headers for a POST call: auth pair plus the form content type.
    pub fn post_headers(&self) -> Result<HeaderMap> {
        let mut headers = self.headers.to_header_map()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        Ok(headers)
    }
}

/// HMAC-SHA256 request signer
#[derive(Clone)]
pub struct RequestSigner {
    credentials: Credentials,
    clock: Arc<dyn Clock>,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_clock(credentials, Arc::new(SystemClock))
    }

    pub fn with_clock(credentials: Credentials, clock: Arc<dyn Clock>) -> Self {
        Self { credentials, clock }
    }

    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Read the signer's clock without signing anything.
    pub fn timestamp_ms(&self) -> Result<u64> {
        self.clock.now_ms()
    }

    /// Lowercase hex HMAC-SHA256 of `message` under the secret.
    pub fn digest(&self, message: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.credentials.expose_secret().as_bytes())
            .map_err(|e| Error::Auth(format!("HMAC key rejected: {}", e)))?;

        mac.update(message.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Sign `params` at the current time.
    ///
    /// Any `timestamp` the caller put in `params` is replaced.
    ///
    /// # Errors
    /// `Error::Clock` if the clock cannot be read, `Error::InvalidParameter`
    /// if a key or value contains `&` or `=`.
    pub fn sign(&self, params: Params) -> Result<SignedRequest> {
        let timestamp_ms = self.clock.now_ms()?;
        self.sign_at(params, timestamp_ms)
    }

    /// Sign `params` as of `timestamp_ms`.
    pub fn sign_at(&self, mut params: Params, timestamp_ms: u64) -> Result<SignedRequest> {
        params.insert(TIMESTAMP_KEY, timestamp_ms);
        params.validate()?;

        let canonical = params.canonical();
        debug!("Sign payload: {}", canonical);

        let signature = self.digest(&canonical)?;

        Ok(SignedRequest {
            headers: AuthHeaders {
                api_key: self.credentials.api_key().to_string(),
                signature,
            },
            params,
            canonical,
        })
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
