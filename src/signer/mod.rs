//! Request signing: timestamp, canonical parameter string, HMAC headers

pub mod clock;
pub mod credentials;
pub mod hmac;
pub mod params;

pub use clock::{Clock, FixedClock, SystemClock, now_ms};
pub use credentials::Credentials;
pub use self::hmac::{
    API_KEY_HEADER, AuthHeaders, FORM_CONTENT_TYPE, RequestSigner, SIGNATURE_HEADER, SignedRequest,
};
pub use params::{Params, TIMESTAMP_KEY};
