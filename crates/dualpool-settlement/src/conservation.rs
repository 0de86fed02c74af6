//! Conservation invariant checker.
//!
//! Invariants checked against the ledger:
//! ```text
//! ∀ period, asset: pool.total == Σ position.deposit
//! ∀ period, asset: pool.rewards_paid + pool.fees_taken ≤ pool.total
//! ∀ asset: custody == Σ_periods (total − rewards_paid − fees_taken) + vault
//! ```
//!
//! and, once every depositor of a period has claimed, the floor-division
//! residual left in the reward pool is smaller than the number of claimants.
//!
//! A violation means value was created or lost; callers should stop
//! accepting traffic and alert.

use alloy_primitives::U256;
use dualpool_ledger::{OwnerRewardVault, PeriodLedger};
use dualpool_types::{Amount, Asset, AuctionError, Period, PeriodId, Result};

/// Rounding residual of one reward pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DustReport {
    pub period: PeriodId,
    /// The pool the rewards were paid from.
    pub reward_asset: Asset,
    /// `total − rewards_paid − fees_taken`.
    pub residual: Amount,
    pub claimants: u64,
    /// Depositors of the other asset that haven't claimed yet.
    pub outstanding: usize,
}

impl DustReport {
    /// Whether every entitled depositor has claimed.
    #[must_use]
    pub fn fully_claimed(&self) -> bool {
        self.outstanding == 0
    }

    /// `residual < claimants` once fully claimed. Vacuously true otherwise.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        !self.fully_claimed() || self.claimants == 0 || self.residual < U256::from(self.claimants)
    }
}

/// Stateless auditor over a [`PeriodLedger`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservationAudit;

impl ConservationAudit {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Check the per-pool invariants of one period.
    ///
    /// # Errors
    /// Returns [`AuctionError::InvariantViolation`] naming the broken pool.
    pub fn check_period(&self, id: PeriodId, period: &Period) -> Result<()> {
        self.check_totals(id, period)?;
        for asset in Asset::both() {
            self.residual(id, period, asset)?;
        }
        Ok(())
    }

    /// Check only `pool.total == Σ position.deposit` for both assets.
    pub fn check_totals(&self, id: PeriodId, period: &Period) -> Result<()> {
        for asset in Asset::both() {
            let total = period.total(asset);
            let summed = period.sum_of_deposits(asset);
            if total != summed {
                return Err(AuctionError::InvariantViolation {
                    reason: format!("{id} {asset}: pool total {total} != sum of deposits {summed}"),
                });
            }
        }
        Ok(())
    }

    /// Check every period in the ledger.
    pub fn check_ledger(&self, ledger: &PeriodLedger) -> Result<()> {
        for (id, period) in ledger.periods() {
            self.check_period(*id, period)?;
        }
        Ok(())
    }

    /// What is left in `asset`'s pool after payouts and fees.
    fn residual(&self, id: PeriodId, period: &Period, asset: Asset) -> Result<Amount> {
        let pool = period.pool(asset);
        pool.rewards_paid
            .checked_add(pool.fees_taken)
            .and_then(|out| pool.total.checked_sub(out))
            .ok_or_else(|| AuctionError::InvariantViolation {
                reason: format!(
                    "{id} {asset}: paid {} + fees {} exceed pool total {}",
                    pool.rewards_paid, pool.fees_taken, pool.total
                ),
            })
    }

    /// Rounding residual of the `reward_asset` pool in `period`.
    pub fn dust(&self, id: PeriodId, period: &Period, reward_asset: Asset) -> Result<DustReport> {
        let own_asset = reward_asset.counterpart();
        let outstanding = period
            .positions
            .values()
            .filter(|p| !p.deposit(own_asset).is_zero() && !p.payout_claimed(reward_asset))
            .count();
        Ok(DustReport {
            period: id,
            reward_asset,
            residual: self.residual(id, period, reward_asset)?,
            claimants: period.pool(reward_asset).claimants,
            outstanding,
        })
    }

    /// [`Self::dust`], failing if a fully claimed pool kept too much.
    pub fn check_dust(&self, id: PeriodId, period: &Period, reward_asset: Asset) -> Result<DustReport> {
        let report = self.dust(id, period, reward_asset)?;
        if !report.is_bounded() {
            return Err(AuctionError::InvariantViolation {
                reason: format!(
                    "{id} {reward_asset}: residual {} not below {} claimants",
                    report.residual, report.claimants
                ),
            });
        }
        Ok(report)
    }

    /// Balance the auction account should hold in `asset`.
    pub fn expected_custody(
        &self,
        ledger: &PeriodLedger,
        vault: &OwnerRewardVault,
        asset: Asset,
    ) -> Result<Amount> {
        let mut expected = vault.accrued(asset);
        for (id, period) in ledger.periods() {
            let residual = self.residual(*id, period, asset)?;
            expected = expected
                .checked_add(residual)
                .ok_or_else(|| AuctionError::arithmetic(format!("{asset} custody overflow")))?;
        }
        Ok(expected)
    }

    /// Compare the collaborator's balance for the auction account against
    /// the ledger.
    ///
    /// # Errors
    /// Returns [`AuctionError::InvariantViolation`] if `actual ≠ expected`.
    pub fn verify_custody(
        &self,
        ledger: &PeriodLedger,
        vault: &OwnerRewardVault,
        asset: Asset,
        actual: Amount,
    ) -> Result<()> {
        let expected = self.expected_custody(ledger, vault, asset)?;
        if actual != expected {
            tracing::error!(asset = %asset, %actual, %expected, "custody mismatch");
            return Err(AuctionError::InvariantViolation {
                reason: format!("{asset}: custody {actual} != expected {expected}"),
            });
        }
        Ok(())
    }
}
