//! Error handling - one flat hierarchy for signing, transport and decoding

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// roostoo-tx error hierarchy
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (unreadable file, missing credentials)
    #[error("Configuration error: {0}")]
    Config(String),

    /// System clock could not produce a Unix-epoch timestamp
    #[error("Clock error: {0}")]
    Clock(String),

    /// A parameter would corrupt the canonical string, or an order is malformed
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Signing setup failed (HMAC key, header encoding)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Network/IO errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx HTTP status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Exchange answered with `Success: false`
    #[error("Exchange error: {0}")]
    Exchange(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether the failure happened before anything was sent.
    pub fn is_signing(&self) -> bool {
        matches!(
            self,
            Error::Clock(_) | Error::InvalidParameter(_) | Error::Auth(_)
        )
    }
}
