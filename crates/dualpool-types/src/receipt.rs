//! Receipt types for the Dualpool audit trail.
//!
//! Every committed state change (deposit, claim, refund, owner withdrawal,
//! stop) produces a [`Receipt`]. Its digest commits to all other fields so
//! a log of receipts can be checked independently of the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AccountId, Amount, Asset, PeriodId, constants};

/// The kind of action a receipt records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceiptKind {
    /// An asset was deposited into a period pool.
    Deposit,
    /// A cross-asset reward was paid.
    RewardClaimed,
    /// A depositor's own principal was refunded.
    PrincipalWithdrawn,
    /// Accrued owner fees were paid to a beneficiary.
    OwnerFeeWithdrawn,
    /// The auction was halted.
    Stopped,
}

impl ReceiptKind {
    fn tag(self) -> u8 {
        match self {
            Self::Deposit => 1,
            Self::RewardClaimed => 2,
            Self::PrincipalWithdrawn => 3,
            Self::OwnerFeeWithdrawn => 4,
            Self::Stopped => 5,
        }
    }
}

impl std::fmt::Display for ReceiptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => write!(f, "DEPOSIT"),
            Self::RewardClaimed => write!(f, "REWARD_CLAIMED"),
            Self::PrincipalWithdrawn => write!(f, "PRINCIPAL_WITHDRAWN"),
            Self::OwnerFeeWithdrawn => write!(f, "OWNER_FEE_WITHDRAWN"),
            Self::Stopped => write!(f, "STOPPED"),
        }
    }
}

/// An append-only record of one committed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Position in the log, starting at 0.
    pub sequence: u64,
    pub kind: ReceiptKind,
    /// The period acted on; `None` for owner actions.
    pub period: Option<PeriodId>,
    /// The caller, or the beneficiary for owner fee withdrawals.
    pub account: AccountId,
    /// The asset moved; `None` for [`ReceiptKind::Stopped`].
    pub asset: Option<Asset>,
    /// Amount moved to or from `account`.
    pub amount: Amount,
    /// Fee diverted to the owner (claims only).
    pub fee: Amount,
    /// SHA-256 over the canonical encoding of all fields above.
    pub digest: [u8; 32],
    pub issued_at: DateTime<Utc>,
}

/// Fields of a receipt before it is sequenced and hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptDraft {
    pub kind: ReceiptKind,
    pub period: Option<PeriodId>,
    pub account: AccountId,
    pub asset: Option<Asset>,
    pub amount: Amount,
    pub fee: Amount,
}

impl Receipt {
    /// Seal a draft into a receipt at `sequence`.
    #[must_use]
    pub fn seal(draft: ReceiptDraft, sequence: u64, issued_at: DateTime<Utc>) -> Self {
        let mut receipt = Self {
            sequence,
            kind: draft.kind,
            period: draft.period,
            account: draft.account,
            asset: draft.asset,
            amount: draft.amount,
            fee: draft.fee,
            digest: [0u8; 32],
            issued_at,
        };
        receipt.digest = receipt.compute_digest();
        receipt
    }

    /// Canonical digest of the receipt's fields (excluding `digest` itself).
    #[must_use]
    pub fn compute_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(constants::RECEIPT_DOMAIN);
        hasher.update(self.sequence.to_le_bytes());
        hasher.update([self.kind.tag()]);
        match self.period {
            Some(p) => {
                hasher.update([1u8]);
                hasher.update(p.0.to_le_bytes());
            }
            None => hasher.update([0u8]),
        }
        hasher.update(self.account.as_bytes());
        hasher.update([match self.asset {
            None => 0u8,
            Some(Asset::Native) => 1,
            Some(Asset::Token) => 2,
        }]);
        hasher.update(self.amount.to_be_bytes::<32>());
        hasher.update(self.fee.to_be_bytes::<32>());
        hasher.update(self.issued_at.timestamp_millis().to_le_bytes());
        hasher.finalize().into()
    }

    /// Whether the stored digest matches the fields.
    #[must_use]
    pub fn verify(&self) -> bool {
        self.digest == self.compute_digest()
    }

    /// Hex rendering of the digest.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    fn draft() -> ReceiptDraft {
        ReceiptDraft {
            kind: ReceiptKind::RewardClaimed,
            period: Some(PeriodId(2)),
            account: AccountId::from_bytes([1u8; 16]),
            asset: Some(Asset::Native),
            amount: U256::from(7u64),
            fee: U256::from(1u64),
        }
    }

    #[test]
    fn sealed_receipt_verifies() {
        let receipt = Receipt::seal(draft(), 0, Utc::now());
        assert!(receipt.verify());
        assert_eq!(receipt.digest_hex().len(), 64);
    }

    #[test]
    fn tampered_receipt_fails_verification() {
        let mut receipt = Receipt::seal(draft(), 0, Utc::now());
        receipt.amount = U256::from(8u64);
        assert!(!receipt.verify());
    }

    #[test]
    fn sequence_changes_digest() {
        let now = Utc::now();
        let a = Receipt::seal(draft(), 0, now);
        let b = Receipt::seal(draft(), 1, now);
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn receipt_kind_display() {
        assert_eq!(format!("{}", ReceiptKind::Deposit), "DEPOSIT");
        assert_eq!(format!("{}", ReceiptKind::Stopped), "STOPPED");
    }

    #[test]
    fn receipt_serde_roundtrip() {
        let receipt = Receipt::seal(draft(), 3, Utc::now());
        let json = serde_json::to_string(&receipt).unwrap();
        let back: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt, back);
        assert!(back.verify());
    }
}
