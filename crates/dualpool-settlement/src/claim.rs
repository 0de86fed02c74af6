//! Cross-asset reward settlement.
//!
//! A depositor of one asset is paid out of the *other* asset's pool,
//! proportionally to their share of the pool they contributed to:
//!
//! ```text
//! gross = floor(counterpart_total × own_deposit / own_total)
//! fee   = floor(gross × fee_numerator / FULL_PERCENT)
//! net   = gross − fee
//! ```
//!
//! The multiplication happens before the division and each division floors,
//! so `Σ net + Σ fee ≤ counterpart_total`. The residual (dust) stays in the
//! pool and is smaller than the number of claimants.

use dualpool_ledger::{OwnerRewardVault, PeriodLedger};
use dualpool_types::{
    AccountId, Amount, Asset, AuctionError, FeeRate, PeriodId, Result, ReturnBreakdown, constants,
};

/// A validated claim, ready to be paid and committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimPlan {
    pub period: PeriodId,
    pub account: AccountId,
    /// The asset the reward is paid in (the counterpart of the deposit).
    pub reward_asset: Asset,
    pub breakdown: ReturnBreakdown,
}

/// Computes and books cross-asset rewards at a fixed fee rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimEngine {
    fee: FeeRate,
}

impl ClaimEngine {
    #[must_use]
    pub fn new(fee: FeeRate) -> Self {
        Self { fee }
    }

    #[must_use]
    pub fn fee(&self) -> FeeRate {
        self.fee
    }

    /// `account`'s gross reward in `reward_asset` for `period`.
    ///
    /// # Errors
    /// Returns `Arithmetic` when nobody deposited the caller's own asset
    /// (division by zero) or on multiplication overflow.
    pub fn gross_return(
        &self,
        ledger: &PeriodLedger,
        period: PeriodId,
        account: &AccountId,
        reward_asset: Asset,
    ) -> Result<Amount> {
        let own_asset = reward_asset.counterpart();
        let counterpart_total = ledger.total(period, reward_asset);
        let own_deposit = ledger.deposit_of(period, account, own_asset);
        let own_total = ledger.total(period, own_asset);

        counterpart_total
            .checked_mul(own_deposit)
            .ok_or_else(|| AuctionError::arithmetic(format!("{reward_asset} gross overflow")))?
            .checked_div(own_total)
            .ok_or_else(|| {
                AuctionError::arithmetic(format!("no {own_asset} deposits in {period}"))
            })
    }

    /// Owner's cut of `gross`.
    pub fn fee_on(&self, gross: Amount) -> Result<Amount> {
        gross
            .checked_mul(self.fee.numerator())
            .ok_or_else(|| AuctionError::arithmetic("fee overflow"))?
            .checked_div(constants::FULL_PERCENT)
            .ok_or_else(|| AuctionError::arithmetic("FULL_PERCENT is zero"))
    }

    /// Split a gross amount into fee and net.
    ///
    /// # Errors
    /// Returns `Arithmetic` if the fee exceeds the gross amount, which
    /// happens only with a fee numerator above `FULL_PERCENT`.
    pub fn breakdown(&self, gross: Amount) -> Result<ReturnBreakdown> {
        let fee = self.fee_on(gross)?;
        let net = gross.checked_sub(fee).ok_or_else(|| {
            AuctionError::arithmetic(format!("fee {fee} exceeds gross return {gross}"))
        })?;
        Ok(ReturnBreakdown { gross, fee, net })
    }

    /// Query equivalent of a claim: what `account` would receive right now.
    pub fn calculate_return(
        &self,
        ledger: &PeriodLedger,
        period: PeriodId,
        account: &AccountId,
        reward_asset: Asset,
    ) -> Result<ReturnBreakdown> {
        let gross = self.gross_return(ledger, period, account, reward_asset)?;
        self.breakdown(gross)
    }

    /// Validate a claim. Checks, in order:
    ///
    /// 1. `period` is closed (`PeriodNotFinished`)
    /// 2. the caller has a deposit of the other asset (`MissingOwnDeposit`)
    /// 3. the reward pool is non-empty (`MissingCounterpartDeposits`)
    /// 4. not claimed before (`AlreadyClaimed`)
    ///
    /// The stop switch is deliberately not consulted.
    pub fn prepare(
        &self,
        ledger: &PeriodLedger,
        vault: &OwnerRewardVault,
        period: PeriodId,
        current: PeriodId,
        account: AccountId,
        reward_asset: Asset,
    ) -> Result<ClaimPlan> {
        let own_asset = reward_asset.counterpart();

        if !period.is_before(current) {
            return Err(AuctionError::PeriodNotFinished { period, current });
        }
        if ledger.deposit_of(period, &account, own_asset).is_zero() {
            return Err(AuctionError::MissingOwnDeposit {
                period,
                asset: own_asset,
            });
        }
        if ledger.total(period, reward_asset).is_zero() {
            return Err(AuctionError::MissingCounterpartDeposits {
                period,
                asset: reward_asset,
            });
        }
        if ledger.payout_claimed(period, &account, reward_asset) {
            return Err(AuctionError::AlreadyClaimed {
                period,
                asset: reward_asset,
            });
        }

        let breakdown = self.calculate_return(ledger, period, &account, reward_asset)?;

        // Commit must not fail once the payout went out.
        vault
            .accrued(reward_asset)
            .checked_add(breakdown.fee)
            .ok_or_else(|| AuctionError::arithmetic(format!("{reward_asset} owner fee overflow")))?;

        tracing::debug!(
            period = %period,
            account = %account,
            asset = %reward_asset,
            gross = %breakdown.gross,
            fee = %breakdown.fee,
            net = %breakdown.net,
            "claim prepared"
        );

        Ok(ClaimPlan {
            period,
            account,
            reward_asset,
            breakdown,
        })
    }

    /// Set the claim flag, book the payout against the pool and move the fee
    /// into the owner vault.
    pub fn commit(
        &self,
        ledger: &mut PeriodLedger,
        vault: &mut OwnerRewardVault,
        plan: &ClaimPlan,
    ) -> Result<()> {
        ledger.record_reward(plan.period, plan.account, plan.reward_asset, &plan.breakdown)?;
        vault.accrue(plan.reward_asset, plan.breakdown.fee)
    }
}
