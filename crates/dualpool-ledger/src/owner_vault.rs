//! Accrued owner fees.
//!
//! Fees flow in on every reward claim and flow out only through an owner
//! withdrawal, which always drains the full balance of one asset.

use alloy_primitives::U256;
use dualpool_types::{Amount, Asset, AuctionError, Result};
use serde::{Deserialize, Serialize};

/// Fee balances in both assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRewardVault {
    native: Amount,
    token: Amount,
}

impl OwnerRewardVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fee balance currently held for `asset`.
    #[must_use]
    pub fn accrued(&self, asset: Asset) -> Amount {
        match asset {
            Asset::Native => self.native,
            Asset::Token => self.token,
        }
    }

    fn slot(&mut self, asset: Asset) -> &mut Amount {
        match asset {
            Asset::Native => &mut self.native,
            Asset::Token => &mut self.token,
        }
    }

    /// Add a claim's fee to the vault.
    ///
    /// # Errors
    /// Returns `Arithmetic` if the balance would overflow; the vault is unchanged.
    pub fn accrue(&mut self, asset: Asset, fee: Amount) -> Result<()> {
        let slot = self.slot(asset);
        *slot = slot
            .checked_add(fee)
            .ok_or_else(|| AuctionError::arithmetic(format!("{asset} owner fee overflow")))?;
        Ok(())
    }

    /// Drain the vault for `asset`, returning what was held.
    pub fn take(&mut self, asset: Asset) -> Amount {
        std::mem::replace(self.slot(asset), U256::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accrue_accumulates_per_asset() {
        let mut vault = OwnerRewardVault::new();
        vault.accrue(Asset::Native, U256::from(3u64)).unwrap();
        vault.accrue(Asset::Native, U256::from(4u64)).unwrap();
        vault.accrue(Asset::Token, U256::from(10u64)).unwrap();
        assert_eq!(vault.accrued(Asset::Native), U256::from(7u64));
        assert_eq!(vault.accrued(Asset::Token), U256::from(10u64));
    }

    #[test]
    fn take_resets_to_zero() {
        let mut vault = OwnerRewardVault::new();
        vault.accrue(Asset::Token, U256::from(9u64)).unwrap();
        assert_eq!(vault.take(Asset::Token), U256::from(9u64));
        assert!(vault.accrued(Asset::Token).is_zero());
        assert!(vault.take(Asset::Token).is_zero());
    }

    #[test]
    fn overflow_leaves_vault_unchanged() {
        let mut vault = OwnerRewardVault::new();
        vault.accrue(Asset::Native, U256::MAX).unwrap();
        let err = vault.accrue(Asset::Native, U256::from(1u64)).unwrap_err();
        assert!(matches!(err, AuctionError::Arithmetic { .. }));
        assert_eq!(vault.accrued(Asset::Native), U256::MAX);
    }

    #[test]
    fn vault_survives_json() {
        let mut vault = OwnerRewardVault::new();
        vault.accrue(Asset::Token, U256::from(42u64)).unwrap();
        let json = serde_json::to_string(&vault).unwrap();
        let back: OwnerRewardVault = serde_json::from_str(&json).unwrap();
        assert_eq!(vault, back);
    }
}
