//! Thread-safe handle to one auction.
//!
//! All operations on one auction are serialized behind a single lock, so
//! claims, refunds and owner withdrawals can't interleave and each caller
//! observes a consistent ledger.

use std::sync::Arc;

use dualpool_ledger::{Clock, NativeBank, TokenLedger};
use dualpool_types::{AccountId, Amount, Call, PeriodId, Result, ReturnBreakdown};
use parking_lot::Mutex;

use crate::auction::Auction;
use crate::snapshot::LedgerSnapshot;

/// Cloneable, lock-guarded [`Auction`].
pub struct SharedAuction<C, T, N> {
    inner: Arc<Mutex<Auction<C, T, N>>>,
}

impl<C, T, N> Clone for SharedAuction<C, T, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock, T: TokenLedger, N: NativeBank> SharedAuction<C, T, N> {
    #[must_use]
    pub fn new(auction: Auction<C, T, N>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(auction)),
        }
    }

    /// Run `f` with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&mut Auction<C, T, N>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn deposit_native(&self, call: Call, period: PeriodId) -> Result<()> {
        self.inner.lock().deposit_native(call, period)
    }

    pub fn receive(&self, call: Call) -> Result<()> {
        self.inner.lock().receive(call)
    }

    pub fn deposit_token(&self, call: Call, period: PeriodId, amount: Amount) -> Result<()> {
        self.inner.lock().deposit_token(call, period, amount)
    }

    pub fn claim_native_reward(&self, call: Call, period: PeriodId) -> Result<ReturnBreakdown> {
        self.inner.lock().claim_native_reward(call, period)
    }

    pub fn claim_token_reward(&self, call: Call, period: PeriodId) -> Result<ReturnBreakdown> {
        self.inner.lock().claim_token_reward(call, period)
    }

    pub fn withdraw_native_deposit(&self, call: Call, period: PeriodId) -> Result<Amount> {
        self.inner.lock().withdraw_native_deposit(call, period)
    }

    pub fn withdraw_token_deposit(&self, call: Call, period: PeriodId) -> Result<Amount> {
        self.inner.lock().withdraw_token_deposit(call, period)
    }

    pub fn stop(&self, call: Call) -> Result<()> {
        self.inner.lock().stop(call)
    }

    pub fn withdraw_owner_native_reward(&self, call: Call, beneficiary: AccountId) -> Result<Amount> {
        self.inner.lock().withdraw_owner_native_reward(call, beneficiary)
    }

    pub fn withdraw_owner_token_reward(&self, call: Call, beneficiary: AccountId) -> Result<Amount> {
        self.inner.lock().withdraw_owner_token_reward(call, beneficiary)
    }

    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.inner.lock().snapshot()
    }
}

impl<C, T, N> std::fmt::Debug for SharedAuction<C, T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedAuction")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish()
    }
}
