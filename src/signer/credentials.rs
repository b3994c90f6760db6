//! API credential pair.
//!
//! The secret is held in a `SecretString`: it never shows up in `Debug`
//! output and its memory is zeroed on drop.

use secrecy::{ExposeSecret, SecretString};

/// Public API key plus the shared HMAC secret.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    secret: SecretString,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// The public key sent in `RST-API-KEY`; safe to log.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Raw secret. Only for feeding the MAC.
    pub fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
