//! Principal refunds.
//!
//! A depositor may take their own asset back from a period that has not yet
//! closed once the auction is halted, or from a closed period in which
//! nobody deposited the counterpart asset (so there was nothing to trade
//! against). A closed period with both pools funded is settled by claims
//! only, halted or not.

use dualpool_ledger::{PeriodLedger, StopSwitch};
use dualpool_types::{AccountId, Amount, Asset, AuctionError, PeriodId, Result};

/// A validated refund, ready to be paid and committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalPlan {
    pub period: PeriodId,
    pub account: AccountId,
    pub asset: Asset,
    pub amount: Amount,
}

/// Validates and books principal refunds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrincipalWithdrawalEngine;

impl PrincipalWithdrawalEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate a refund of `account`'s `asset` deposit. Checks, in order:
    ///
    /// 1. not refunded before (`AlreadyWithdrawn`)
    /// 2. a non-zero own deposit exists (`MissingOwnDeposit`)
    /// 3. halted with `period` not before `current`, or `period` closed with
    ///    an empty counterpart pool (`NeitherHaltedNorEmptyCounterpart`)
    pub fn prepare(
        &self,
        ledger: &PeriodLedger,
        stop: &StopSwitch,
        period: PeriodId,
        current: PeriodId,
        account: AccountId,
        asset: Asset,
    ) -> Result<WithdrawalPlan> {
        if ledger.withdrawn(period, &account, asset) {
            return Err(AuctionError::AlreadyWithdrawn { period, asset });
        }
        let amount = ledger.deposit_of(period, &account, asset);
        if amount.is_zero() {
            return Err(AuctionError::MissingOwnDeposit { period, asset });
        }
        let counterpart = asset.counterpart();
        let closed = period.is_before(current);
        let halted_open = stop.refunds_open() && !closed;
        let unmatched = closed && ledger.total(period, counterpart).is_zero();
        if !halted_open && !unmatched {
            return Err(AuctionError::NeitherHaltedNorEmptyCounterpart {
                period,
                counterpart,
            });
        }
        Ok(WithdrawalPlan {
            period,
            account,
            asset,
            amount,
        })
    }

    /// Zero the deposit, shrink the pool and set the withdrawn flag.
    pub fn commit(&self, ledger: &mut PeriodLedger, plan: &WithdrawalPlan) -> Result<Amount> {
        let refunded = ledger.record_refund(plan.period, plan.account, plan.asset)?;
        if refunded != plan.amount {
            return Err(AuctionError::Internal(format!(
                "refund of {} changed between prepare and commit",
                plan.asset
            )));
        }
        Ok(refunded)
    }
}
