//! Period arithmetic.
//!
//! `current = floor((now - genesis) / period_length)`. Periods form a
//! gapless, zero-based, unbounded sequence; asking before genesis fails.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dualpool_types::{AuctionConfig, AuctionError, PeriodId, Result};

use crate::clock::Clock;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Converts instants into period ids for one auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeKeeper {
    genesis: DateTime<Utc>,
    period_length: Duration,
    /// `period_length` in nanoseconds, always > 0.
    period_ns: i128,
}

impl TimeKeeper {
    /// Create a time keeper.
    ///
    /// # Errors
    /// Returns `Configuration` if `period_length` is zero.
    pub fn new(genesis: DateTime<Utc>, period_length: Duration) -> Result<Self> {
        let period_ns = i128::try_from(period_length.as_nanos())
            .map_err(|_| AuctionError::Configuration("period_length is too large".into()))?;
        if period_ns <= 0 {
            return Err(AuctionError::Configuration(
                "period_length must be positive".into(),
            ));
        }
        Ok(Self {
            genesis,
            period_length,
            period_ns,
        })
    }

    pub fn from_config(config: &AuctionConfig) -> Result<Self> {
        Self::new(config.genesis, config.period_length)
    }

    #[must_use]
    pub fn genesis(&self) -> DateTime<Utc> {
        self.genesis
    }

    #[must_use]
    pub fn period_length(&self) -> Duration {
        self.period_length
    }

    /// The period containing `now`.
    ///
    /// # Errors
    /// Returns [`AuctionError::NotStarted`] if `now` is before genesis.
    pub fn period_at(&self, now: DateTime<Utc>) -> Result<PeriodId> {
        if now < self.genesis {
            return Err(AuctionError::NotStarted);
        }
        let elapsed = now - self.genesis;
        let elapsed_ns = i128::from(elapsed.num_seconds()) * NANOS_PER_SEC
            + i128::from(elapsed.subsec_nanos());
        let index = u64::try_from(elapsed_ns / self.period_ns)
            .map_err(|_| AuctionError::arithmetic("period index overflow"))?;
        Ok(PeriodId(index))
    }

    /// The period containing the clock's current instant.
    pub fn current_period(&self, clock: &impl Clock) -> Result<PeriodId> {
        self.period_at(clock.now())
    }

    /// First instant of `period`, if representable.
    #[must_use]
    pub fn period_start(&self, period: PeriodId) -> Option<DateTime<Utc>> {
        let offset = i128::from(period.0).checked_mul(self.period_ns)?;
        let secs = i64::try_from(offset / NANOS_PER_SEC).ok()?;
        let nanos = u32::try_from(offset % NANOS_PER_SEC).ok()?;
        self.genesis
            .checked_add_signed(chrono::TimeDelta::new(secs, nanos)?)
    }

    /// First instant after `period`, i.e. when it becomes claimable.
    /// `None` for the last representable period.
    #[must_use]
    pub fn period_end(&self, period: PeriodId) -> Option<DateTime<Utc>> {
        self.period_start(period.next()?)
    }
}
