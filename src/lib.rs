//! roostoo-tx - Signed REST client for the Roostoo trading API
//!
//! Every authenticated call is signed the same way: the parameters get a
//! fresh `timestamp`, are sorted by key into a canonical `k=v&k=v` string,
//! and the lowercase hex HMAC-SHA256 of that string goes out in
//! `MSG-SIGNATURE` next to the public key in `RST-API-KEY`.
//!
//! ```rust,ignore
//! use roostoo_tx::{Credentials, Params, RequestSigner};
//!
//! let signer = RequestSigner::new(Credentials::new(api_key, secret));
//! let signed = signer.sign(Params::new().with("pair", "BTC/USD"))?;
//! // signed.headers, signed.params (query) or signed.canonical (POST body)
//! ```

// Public modules
pub mod client;
pub mod core;
pub mod signer;

// Re-exports
pub use client::{CancelTarget, OrderQuery, OrderRequest, RoostooClient};
pub use self::core::{Config, Error, OrderType, Result, Side};
pub use signer::{AuthHeaders, Credentials, Params, RequestSigner, SignedRequest};
