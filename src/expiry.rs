//! Per-entry staleness bookkeeping.
//!
//! Deadlines are consulted lazily on access; there is no background sweeper.
//! A stale entry keeps occupying its slot until an operation touches it or
//! capacity pressure evicts it.

use std::time::{Duration, Instant};

use crate::error::ConfigError;

/// Expiry state carried by a cached entry: the current deadline plus the
/// lifetime it was derived from, remembered so a sliding read can renew it.
///
/// A lifetime too large to represent as an `Instant` deadline saturates to
/// "never stale" instead of overflowing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Expiry {
    deadline: Option<Instant>,
    lifetime: Duration,
}

impl Expiry {
    pub(crate) fn new(now: Instant, lifetime: Duration) -> Self {
        Self {
            deadline: now.checked_add(lifetime),
            lifetime,
        }
    }

    pub(crate) fn is_stale(&self, now: Instant) -> bool {
        self.deadline.map_or(false, |deadline| now > deadline)
    }

    /// Slides the deadline forward from `now` by the remembered lifetime.
    pub(crate) fn refresh(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.lifetime);
    }
}

/// Rejects the one invalid `Duration`: zero.
pub(crate) fn validate_lifetime(lifetime: Duration) -> Result<Duration, ConfigError> {
    if lifetime.is_zero() {
        Err(ConfigError::new("`lifetime` must be a positive duration"))
    } else {
        Ok(lifetime)
    }
}
