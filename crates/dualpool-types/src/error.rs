//! Error types for the Dualpool auction.
//!
//! All errors use the `DP_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Time / period errors
//! - 2xx: Deposit errors
//! - 3xx: Reward claim errors
//! - 4xx: Principal withdrawal errors
//! - 5xx: Owner / halt errors
//! - 6xx: External transfer errors
//! - 9xx: General / internal errors
//!
//! Every error is terminal for the operation that raised it: the ledger is
//! left exactly as it was before the call.

use thiserror::Error;

use crate::{AccountId, Asset, PeriodId};

/// Central error enum for all Dualpool operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    // =================================================================
    // Time Errors (1xx)
    // =================================================================
    /// The clock is still before the genesis instant.
    #[error("DP_ERR_100: Auction not started yet")]
    NotStarted,

    /// The period has not closed yet (it is the current or a future period).
    #[error("DP_ERR_101: Period not finished yet: {period} (current {current})")]
    PeriodNotFinished { period: PeriodId, current: PeriodId },

    // =================================================================
    // Deposit Errors (2xx)
    // =================================================================
    /// A deposit of zero was attempted.
    #[error("DP_ERR_200: Missing a deposit")]
    EmptyDeposit,

    /// Deposits for an elapsed period are rejected.
    #[error("DP_ERR_201: Can't deposit for a past period: {period} (current {current})")]
    PastPeriod { period: PeriodId, current: PeriodId },

    /// The auction has been stopped; no new deposits are accepted.
    #[error("DP_ERR_202: The auction is stopped")]
    Halted,

    /// Native value was attached to a call that doesn't accept it.
    #[error("DP_ERR_203: Unexpected native value attached to the call")]
    UnexpectedNativeValue,

    // =================================================================
    // Claim Errors (3xx)
    // =================================================================
    /// The caller has no deposit of their own in this period.
    #[error("DP_ERR_300: Missing the user {asset} deposit for {period}")]
    MissingOwnDeposit { period: PeriodId, asset: Asset },

    /// Nobody deposited the counterpart asset, there's nothing to distribute.
    #[error("DP_ERR_301: Missing {asset} deposits for {period}")]
    MissingCounterpartDeposits { period: PeriodId, asset: Asset },

    /// The cross-asset reward was already paid out to this caller.
    #[error("DP_ERR_302: Already claimed {asset} reward for {period}")]
    AlreadyClaimed { period: PeriodId, asset: Asset },

    // =================================================================
    // Withdrawal Errors (4xx)
    // =================================================================
    /// Principal can only be refunded from an unclosed period once halted,
    /// or from a closed period that had no counterpart deposits.
    #[error("DP_ERR_400: Neither stopped nor 0 {counterpart} deposit for {period}")]
    NeitherHaltedNorEmptyCounterpart {
        period: PeriodId,
        counterpart: Asset,
    },

    /// The principal was already refunded.
    #[error("DP_ERR_401: {asset} deposit for {period} was already withdrawn")]
    AlreadyWithdrawn { period: PeriodId, asset: Asset },

    // =================================================================
    // Owner / Halt Errors (5xx)
    // =================================================================
    /// Only the owner may call this operation.
    #[error("DP_ERR_500: Caller is not the owner: {0}")]
    NotOwner(AccountId),

    /// The stop switch is already engaged.
    #[error("DP_ERR_501: The auction is already stopped")]
    AlreadyStopped,

    // =================================================================
    // External Transfer Errors (6xx)
    // =================================================================
    /// A token or native-value transfer was refused by the collaborator.
    #[error("DP_ERR_600: {asset} transfer failed: {reason}")]
    TransferFailed { asset: Asset, reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Checked arithmetic overflowed, underflowed or divided by zero.
    #[error("DP_ERR_900: Arithmetic error: {reason}")]
    Arithmetic { reason: String },

    /// Configuration error (zero period length, malformed fee, etc.).
    #[error("DP_ERR_901: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("DP_ERR_902: Serialization error: {0}")]
    Serialization(String),

    /// A conservation invariant doesn't hold.
    #[error("DP_ERR_903: Invariant violation: {reason}")]
    InvariantViolation { reason: String },

    /// Unrecoverable internal error.
    #[error("DP_ERR_999: Internal error: {0}")]
    Internal(String),
}

impl AuctionError {
    /// Shorthand for an [`AuctionError::Arithmetic`] error.
    pub fn arithmetic(reason: impl Into<String>) -> Self {
        Self::Arithmetic {
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`AuctionError::TransferFailed`] error.
    pub fn transfer_failed(asset: Asset, reason: impl Into<String>) -> Self {
        Self::TransferFailed {
            asset,
            reason: reason.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, AuctionError>;

impl From<serde_json::Error> for AuctionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = AuctionError::NotStarted;
        let msg = format!("{err}");
        assert!(msg.starts_with("DP_ERR_100"), "Got: {msg}");
    }

    #[test]
    fn past_period_display() {
        let err = AuctionError::PastPeriod {
            period: PeriodId(1),
            current: PeriodId(3),
        };
        let msg = format!("{err}");
        assert!(msg.contains("DP_ERR_201"));
        assert!(msg.contains("period:1"));
        assert!(msg.contains("period:3"));
    }

    #[test]
    fn counterpart_display_names_asset() {
        let err = AuctionError::NeitherHaltedNorEmptyCounterpart {
            period: PeriodId(2),
            counterpart: Asset::Token,
        };
        let msg = format!("{err}");
        assert!(msg.contains("DP_ERR_400"));
        assert!(msg.contains("TOKEN"));
    }

    #[test]
    fn all_errors_have_dp_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(AuctionError::EmptyDeposit),
            Box::new(AuctionError::Halted),
            Box::new(AuctionError::AlreadyStopped),
            Box::new(AuctionError::NotOwner(AccountId::new())),
            Box::new(AuctionError::arithmetic("overflow")),
            Box::new(AuctionError::transfer_failed(Asset::Native, "rejected")),
            Box::new(AuctionError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("DP_ERR_"),
                "Error missing DP_ERR_ prefix: {msg}"
            );
        }
    }

    #[test]
    fn serde_json_error_converts() {
        let err: AuctionError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(matches!(err, AuctionError::Serialization(_)));
    }
}
