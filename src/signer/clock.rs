//! Timestamp provider for the `timestamp` request field.
//!
//! The server checks the token against its replay window, so every signed
//! request reads the clock afresh. Tokens are milliseconds since the Unix
//! epoch. A backward step of at most `MAX_BACKSTEP_MS` is absorbed by
//! repeating the last token; a larger one is a clock correction and is
//! mirrored as-is.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::{Error, Result};

/// Last timestamp handed out by any `SystemClock` in this process.
static LAST_MS: AtomicU64 = AtomicU64::new(0);

/// Largest backward step treated as jitter rather than a clock correction.
pub const MAX_BACKSTEP_MS: u64 = 50;

/// Source of millisecond timestamps.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> Result<u64>;
}

/// Wall clock with backward jitter smoothed out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> Result<u64> {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::Clock(format!("system clock before Unix epoch: {}", e)))?
            .as_millis();
        let wall = u64::try_from(wall)
            .map_err(|_| Error::Clock("millisecond timestamp overflows u64".to_string()))?;

        Ok(advance(&LAST_MS, wall))
    }
}

/// Record `wall` as the newest reading and return the token to issue.
fn advance(last: &AtomicU64, wall: u64) -> u64 {
    let mut prev = last.load(Ordering::Acquire);
    loop {
        let next = if wall >= prev || prev - wall > MAX_BACKSTEP_MS {
            wall
        } else {
            prev
        };
        match last.compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

/// Clock pinned to one instant. Used to reproduce a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> Result<u64> {
        Ok(self.0)
    }
}

/// Current time as the decimal token placed in `timestamp`.
pub fn now_ms() -> Result<String> {
    SystemClock.now_ms().map(|ms| ms.to_string())
}
