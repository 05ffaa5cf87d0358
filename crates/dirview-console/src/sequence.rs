//! Request sequencing.
//!
//! Each panel records the token of the last request issued for it. A response
//! is applied only while its token is still that latest one, so a slow early
//! response can never overwrite a later request's result.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw sequence number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tokens.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next: AtomicU64,
}

impl RequestSequencer {
    /// New sequencer starting at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Issue the next token.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Latest request issued for one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSlot {
    latest: Option<RequestToken>,
}

impl RequestSlot {
    /// Record `token` as the latest request for this target.
    pub fn claim(&mut self, token: RequestToken) {
        self.latest = Some(token);
    }

    /// Returns true if `token` is still the latest request.
    #[must_use]
    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest == Some(token)
    }
}
