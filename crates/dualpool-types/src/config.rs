//! Configuration for an auction instance.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, AuctionError, FeeRate, Result};

/// Immutable construction parameters of an auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionConfig {
    /// Start of period 0.
    pub genesis: DateTime<Utc>,
    /// Length of every period. Must be non-zero.
    pub period_length: Duration,
    /// Fee retained by the owner on every cross-asset reward.
    pub fee: FeeRate,
    /// The only account allowed to stop the auction and withdraw fees.
    pub owner: AccountId,
    /// The account the auction holds funds under (token `transferFrom` target).
    pub auction_account: AccountId,
}

impl AuctionConfig {
    /// Create a config with a fresh auction account and no fee.
    #[must_use]
    pub fn new(genesis: DateTime<Utc>, period_length: Duration, owner: AccountId) -> Self {
        Self {
            genesis,
            period_length,
            fee: FeeRate::ZERO,
            owner,
            auction_account: AccountId::new(),
        }
    }

    /// Set the owner fee.
    #[must_use]
    pub fn with_fee(mut self, fee: FeeRate) -> Self {
        self.fee = fee;
        self
    }

    /// Set the account funds are held under.
    #[must_use]
    pub fn with_auction_account(mut self, account: AccountId) -> Self {
        self.auction_account = account;
        self
    }

    /// Check the config can drive an auction.
    ///
    /// The fee is intentionally not bounded here.
    ///
    /// # Errors
    /// Returns [`AuctionError::Configuration`] if the period length is zero
    /// or the owner doubles as the auction account.
    pub fn validate(&self) -> Result<()> {
        if self.period_length.is_zero() {
            return Err(AuctionError::Configuration(
                "period_length must be positive".into(),
            ));
        }
        if self.owner == self.auction_account {
            return Err(AuctionError::Configuration(
                "owner and auction_account must differ".into(),
            ));
        }
        Ok(())
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use chrono::TimeZone;

    fn genesis() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn default_fee_is_zero() {
        let cfg = AuctionConfig::new(genesis(), Duration::from_secs(3600), AccountId::new());
        assert_eq!(cfg.fee, FeeRate::ZERO);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_period_rejected() {
        let cfg = AuctionConfig::new(genesis(), Duration::ZERO, AccountId::new());
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, AuctionError::Configuration(_)));
    }

    #[test]
    fn sub_millisecond_period_accepted() {
        let cfg = AuctionConfig::new(genesis(), Duration::from_micros(10), AccountId::new());
        assert!(cfg.validate().is_ok());
        let odd = AuctionConfig::new(genesis(), Duration::from_nanos(1_500_900), AccountId::new());
        assert!(odd.validate().is_ok());
    }

    #[test]
    fn owner_cannot_be_auction_account() {
        let owner = AccountId::new();
        let cfg = AuctionConfig::new(genesis(), Duration::from_secs(60), owner)
            .with_auction_account(owner);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn oversized_fee_is_accepted() {
        let cfg = AuctionConfig::new(genesis(), Duration::from_secs(60), AccountId::new())
            .with_fee(FeeRate::from_numerator(U256::MAX));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_json_roundtrip() {
        let cfg = AuctionConfig::new(genesis(), Duration::from_secs(3600), AccountId::new())
            .with_fee(FeeRate::from_numerator(U256::from(12u64)));
        let json = cfg.to_json().unwrap();
        let back = AuctionConfig::from_json(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn from_json_validates() {
        let cfg = AuctionConfig::new(genesis(), Duration::ZERO, AccountId::new());
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(AuctionConfig::from_json(&json).is_err());
    }
}
