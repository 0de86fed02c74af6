//! Persisted auction state.
//!
//! A [`LedgerSnapshot`] holds everything needed to resume an auction except
//! its collaborators (clock, token ledger, native bank), which the host
//! reattaches through [`crate::Auction::restore`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use dualpool_ledger::OwnerRewardVault;
use dualpool_types::{AuctionConfig, AuctionError, Period, PeriodId, Receipt, Result};
use serde::{Deserialize, Serialize};

/// Serializable state of one auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub config: AuctionConfig,
    pub periods: BTreeMap<PeriodId, Period>,
    pub vault: OwnerRewardVault,
    pub stopped: bool,
    pub receipts: Vec<Receipt>,
    pub taken_at: DateTime<Utc>,
}

impl LedgerSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(AuctionError::from)
    }

    /// Parse a snapshot, rejecting one whose receipt log was tampered with.
    ///
    /// # Errors
    /// `Serialization` on malformed JSON, `InvariantViolation` if a receipt
    /// digest or sequence number doesn't check out.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.verify_receipts()?;
        Ok(snapshot)
    }

    /// Every receipt is sealed and numbered consecutively from zero.
    pub fn verify_receipts(&self) -> Result<()> {
        for (expected, receipt) in (0u64..).zip(&self.receipts) {
            if receipt.sequence != expected {
                return Err(AuctionError::InvariantViolation {
                    reason: format!(
                        "receipt sequence gap: expected {expected}, found {}",
                        receipt.sequence
                    ),
                });
            }
            if !receipt.verify() {
                return Err(AuctionError::InvariantViolation {
                    reason: format!("receipt {expected} digest mismatch"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use dualpool_types::{AccountId, Asset, ReceiptDraft, ReceiptKind};

    fn sample() -> LedgerSnapshot {
        let genesis = Utc::now();
        let alice = AccountId::new();
        let mut period = Period::new();
        period.native.total = U256::from(5u64);
        period.position_mut(alice).native_deposit = U256::from(5u64);
        let receipt = Receipt::seal(
            ReceiptDraft {
                kind: ReceiptKind::Deposit,
                period: Some(PeriodId(0)),
                account: alice,
                asset: Some(Asset::Native),
                amount: U256::from(5u64),
                fee: U256::ZERO,
            },
            0,
            genesis,
        );
        LedgerSnapshot {
            config: AuctionConfig::new(genesis, std::time::Duration::from_secs(60), AccountId::new()),
            periods: BTreeMap::from([(PeriodId(0), period)]),
            vault: OwnerRewardVault::new(),
            stopped: false,
            receipts: vec![receipt],
            taken_at: genesis,
        }
    }

    #[test]
    fn json_roundtrip() {
        let snapshot = sample();
        let json = snapshot.to_json().unwrap();
        let back = LedgerSnapshot::from_json(&json).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn tampered_receipt_rejected() {
        let mut snapshot = sample();
        snapshot.receipts[0].amount = U256::from(6u64);
        let json = snapshot.to_json().unwrap();
        let err = LedgerSnapshot::from_json(&json).unwrap_err();
        assert!(matches!(err, AuctionError::InvariantViolation { .. }));
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = LedgerSnapshot::from_json("{not json").unwrap_err();
        assert!(matches!(err, AuctionError::Serialization(_)));
    }
}
