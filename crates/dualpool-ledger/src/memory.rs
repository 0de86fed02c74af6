//! In-memory reference collaborators.
//!
//! [`InMemoryTokenLedger`] behaves like a standard fungible token with
//! balances and allowances; [`InMemoryNativeBank`] holds native balances and
//! can be told to have specific recipients refuse payments. Both act for a
//! single custodian account (the auction). All mutations are atomic: either
//! the full transfer happens or nothing changes.

use std::collections::{HashMap, HashSet};

use alloy_primitives::U256;
use dualpool_types::{AccountId, Amount, Asset, AuctionError, Result};

use crate::transfer::{NativeBank, TokenLedger};

/// Move `amount` between two entries of a balance map.
fn move_balance(
    balances: &mut HashMap<AccountId, Amount>,
    asset: Asset,
    from: AccountId,
    to: AccountId,
    amount: Amount,
) -> Result<()> {
    let available = balances.get(&from).copied().unwrap_or(U256::ZERO);
    if available < amount {
        return Err(AuctionError::transfer_failed(
            asset,
            format!("insufficient balance: need {amount}, have {available}"),
        ));
    }
    let credited = balances
        .get(&to)
        .copied()
        .unwrap_or(U256::ZERO)
        .checked_add(amount)
        .ok_or_else(|| AuctionError::transfer_failed(asset, "recipient balance overflow"))?;
    if from != to {
        balances.insert(from, available - amount);
        balances.insert(to, credited);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// InMemoryTokenLedger
// ---------------------------------------------------------------------------

/// Token balances and allowances, operated by `custodian`.
#[derive(Debug, Clone)]
pub struct InMemoryTokenLedger {
    custodian: AccountId,
    balances: HashMap<AccountId, Amount>,
    /// `(owner, spender) → remaining allowance`
    allowances: HashMap<(AccountId, AccountId), Amount>,
    total_supply: Amount,
}

impl InMemoryTokenLedger {
    #[must_use]
    pub fn new(custodian: AccountId) -> Self {
        Self {
            custodian,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: U256::ZERO,
        }
    }

    #[must_use]
    pub fn custodian(&self) -> AccountId {
        self.custodian
    }

    /// Create `amount` new tokens for `to`.
    pub fn mint(&mut self, to: AccountId, amount: Amount) -> Result<()> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or_else(|| AuctionError::arithmetic("token supply overflow"))?;
        let entry = self.balances.entry(to).or_insert(U256::ZERO);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| AuctionError::arithmetic("token balance overflow"))?;
        self.total_supply = supply;
        Ok(())
    }

    /// Let `spender` pull up to `amount` from `owner`. Replaces any prior allowance.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: Amount) {
        self.allowances.insert((owner, spender), amount);
    }

    #[must_use]
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    /// Holder-initiated transfer between two accounts.
    pub fn transfer_between(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        move_balance(&mut self.balances, Asset::Token, from, to, amount)
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }
}

impl TokenLedger for InMemoryTokenLedger {
    fn transfer_from(&mut self, from: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        let allowance = self.allowance(&from, &self.custodian);
        if allowance < amount {
            return Err(AuctionError::transfer_failed(
                Asset::Token,
                format!("insufficient allowance: need {amount}, have {allowance}"),
            ));
        }
        move_balance(&mut self.balances, Asset::Token, from, to, amount)?;
        self.allowances
            .insert((from, self.custodian), allowance - amount);
        Ok(())
    }

    fn transfer(&mut self, to: AccountId, amount: Amount) -> Result<()> {
        move_balance(&mut self.balances, Asset::Token, self.custodian, to, amount)
    }

    fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(U256::ZERO)
    }
}

// ---------------------------------------------------------------------------
// InMemoryNativeBank
// ---------------------------------------------------------------------------

/// Native balances, paying out of `custodian`.
#[derive(Debug, Clone)]
pub struct InMemoryNativeBank {
    custodian: AccountId,
    balances: HashMap<AccountId, Amount>,
    /// Accounts that refuse incoming payments.
    rejecting: HashSet<AccountId>,
}

impl InMemoryNativeBank {
    #[must_use]
    pub fn new(custodian: AccountId) -> Self {
        Self {
            custodian,
            balances: HashMap::new(),
            rejecting: HashSet::new(),
        }
    }

    #[must_use]
    pub fn custodian(&self) -> AccountId {
        self.custodian
    }

    /// Credit `amount` out of thin air (genesis allocation).
    pub fn fund(&mut self, account: AccountId, amount: Amount) -> Result<()> {
        let entry = self.balances.entry(account).or_insert(U256::ZERO);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| AuctionError::arithmetic("native balance overflow"))?;
        Ok(())
    }

    /// Move value attached to a call from `from` to the custodian.
    pub fn receive(&mut self, from: AccountId, amount: Amount) -> Result<()> {
        move_balance(
            &mut self.balances,
            Asset::Native,
            from,
            self.custodian,
            amount,
        )
    }

    /// Make `account` refuse (or accept again) incoming payments.
    pub fn set_rejects_payments(&mut self, account: AccountId, rejects: bool) {
        if rejects {
            self.rejecting.insert(account);
        } else {
            self.rejecting.remove(&account);
        }
    }
}

impl NativeBank for InMemoryNativeBank {
    fn pay(&mut self, to: AccountId, amount: Amount) -> Result<()> {
        if self.rejecting.contains(&to) {
            return Err(AuctionError::transfer_failed(
                Asset::Native,
                format!("recipient {to} rejected the payment"),
            ));
        }
        move_balance(&mut self.balances, Asset::Native, self.custodian, to, amount)
    }

    fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(U256::ZERO)
    }
}
