//! Caller context for write operations.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, AuctionError, Result};

/// Who invokes an operation, and how much native currency rides along.
///
/// Native deposits take their amount from `value`. Every other write
/// operation is non-payable and rejects a non-zero `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// The invoking account.
    pub sender: AccountId,
    /// Native currency attached to the call.
    pub value: Amount,
}

impl Call {
    /// A call from `sender` with no attached value.
    #[must_use]
    pub fn new(sender: AccountId) -> Self {
        Self {
            sender,
            value: U256::ZERO,
        }
    }

    /// Attach native value to the call.
    #[must_use]
    pub fn with_value(mut self, value: Amount) -> Self {
        self.value = value;
        self
    }

    /// Reject the call if it carries native value.
    ///
    /// # Errors
    /// Returns [`AuctionError::UnexpectedNativeValue`] when `value > 0`.
    pub fn ensure_no_value(&self) -> Result<()> {
        if self.value.is_zero() {
            Ok(())
        } else {
            Err(AuctionError::UnexpectedNativeValue)
        }
    }
}

impl From<AccountId> for Call {
    fn from(sender: AccountId) -> Self {
        Self::new(sender)
    }
}
