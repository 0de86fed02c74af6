//! Per-period storage of pools and positions.
//!
//! Periods are created lazily on the first deposit naming them and are never
//! removed. Every mutation is split into a read-only `check_*` step and a
//! `record_*` step so the caller can run an external transfer in between
//! and commit only on success.
//!
//! Invariant kept by every `record_*`: for each period and asset,
//! `pool.total == Σ position.deposit`.

use std::collections::BTreeMap;

use alloy_primitives::U256;
use dualpool_types::{
    AccountId, Amount, Asset, AuctionError, Period, PeriodId, Position, Result, ReturnBreakdown,
};

use crate::stop_switch::StopSwitch;

/// All periods of one auction, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodLedger {
    periods: BTreeMap<PeriodId, Period>,
}

impl PeriodLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted periods.
    #[must_use]
    pub fn from_periods(periods: BTreeMap<PeriodId, Period>) -> Self {
        Self { periods }
    }

    // =================================================================
    // Queries
    // =================================================================

    /// The stored record for `period`, if anything was ever deposited.
    #[must_use]
    pub fn period(&self, period: PeriodId) -> Option<&Period> {
        self.periods.get(&period)
    }

    /// All touched periods in ascending order.
    pub fn periods(&self) -> impl Iterator<Item = (&PeriodId, &Period)> {
        self.periods.iter()
    }

    #[must_use]
    pub fn into_periods(self) -> BTreeMap<PeriodId, Period> {
        self.periods
    }

    /// Pool total of `asset` in `period` (zero for untouched periods).
    #[must_use]
    pub fn total(&self, period: PeriodId, asset: Asset) -> Amount {
        self.periods
            .get(&period)
            .map_or(U256::ZERO, |p| p.total(asset))
    }

    /// `account`'s deposit of `asset` in `period`.
    #[must_use]
    pub fn deposit_of(&self, period: PeriodId, account: &AccountId, asset: Asset) -> Amount {
        self.periods
            .get(&period)
            .map_or(U256::ZERO, |p| p.deposit_of(account, asset))
    }

    /// `account`'s full position in `period`.
    #[must_use]
    pub fn position(&self, period: PeriodId, account: &AccountId) -> Position {
        self.periods
            .get(&period)
            .map(|p| p.position(account))
            .unwrap_or_default()
    }

    /// Whether `account` already received the reward paid in `reward_asset`.
    #[must_use]
    pub fn payout_claimed(&self, period: PeriodId, account: &AccountId, reward_asset: Asset) -> bool {
        self.position(period, account).payout_claimed(reward_asset)
    }

    /// Whether `account` already pulled back their `asset` principal.
    #[must_use]
    pub fn withdrawn(&self, period: PeriodId, account: &AccountId, asset: Asset) -> bool {
        self.position(period, account).withdrawn(asset)
    }

    // =================================================================
    // Deposits
    // =================================================================

    /// Validate a deposit without touching state.
    ///
    /// # Errors
    /// - `EmptyDeposit` if `amount` is zero
    /// - `PastPeriod` if `period` is before `current`
    /// - `Halted` if the stop switch is engaged
    pub fn check_deposit(
        &self,
        period: PeriodId,
        current: PeriodId,
        amount: Amount,
        stop: &StopSwitch,
    ) -> Result<()> {
        if amount.is_zero() {
            return Err(AuctionError::EmptyDeposit);
        }
        if period.is_before(current) {
            return Err(AuctionError::PastPeriod { period, current });
        }
        stop.check_deposits_open()
    }

    /// Credit `amount` of `asset` to `account` in `period`, creating the
    /// period on first touch. Returns the account's new deposit.
    ///
    /// # Errors
    /// Returns `Arithmetic` on overflow; nothing is written in that case.
    pub fn record_deposit(
        &mut self,
        period: PeriodId,
        account: AccountId,
        asset: Asset,
        amount: Amount,
    ) -> Result<Amount> {
        let overflow = || AuctionError::arithmetic(format!("{asset} deposit overflow in {period}"));
        let new_total = self
            .total(period, asset)
            .checked_add(amount)
            .ok_or_else(overflow)?;
        let new_deposit = self
            .deposit_of(period, &account, asset)
            .checked_add(amount)
            .ok_or_else(overflow)?;

        let record = self.periods.entry(period).or_insert_with(|| {
            tracing::debug!(period = %period, "period record created");
            Period::new()
        });
        record.pool_mut(asset).total = new_total;
        *record.position_mut(account).deposit_mut(asset) = new_deposit;
        Ok(new_deposit)
    }

    // =================================================================
    // Settlement bookkeeping
    // =================================================================

    /// Mark the reward in `reward_asset` as paid to `account` and book it
    /// against the `reward_asset` pool.
    ///
    /// # Errors
    /// Returns `Arithmetic` on overflow of the pool's payout counters, or
    /// `Internal` if the period was never created.
    pub fn record_reward(
        &mut self,
        period: PeriodId,
        account: AccountId,
        reward_asset: Asset,
        breakdown: &ReturnBreakdown,
    ) -> Result<()> {
        let record = self
            .periods
            .get_mut(&period)
            .ok_or_else(|| AuctionError::Internal(format!("reward booked against unknown {period}")))?;
        let pool = record.pool(reward_asset);
        let rewards_paid = pool
            .rewards_paid
            .checked_add(breakdown.net)
            .ok_or_else(|| AuctionError::arithmetic("rewards_paid overflow"))?;
        let fees_taken = pool
            .fees_taken
            .checked_add(breakdown.fee)
            .ok_or_else(|| AuctionError::arithmetic("fees_taken overflow"))?;

        let pool = record.pool_mut(reward_asset);
        pool.rewards_paid = rewards_paid;
        pool.fees_taken = fees_taken;
        pool.claimants = pool.claimants.saturating_add(1);
        record.position_mut(account).mark_payout_claimed(reward_asset);
        Ok(())
    }

    /// Zero `account`'s `asset` deposit in `period`, shrink the pool by the
    /// same amount and set the withdrawn flag. Returns the refunded amount.
    ///
    /// # Errors
    /// Returns `Internal` if the pool is smaller than the deposit, which
    /// would mean the conservation invariant was already broken.
    pub fn record_refund(
        &mut self,
        period: PeriodId,
        account: AccountId,
        asset: Asset,
    ) -> Result<Amount> {
        let record = self
            .periods
            .get_mut(&period)
            .ok_or_else(|| AuctionError::Internal(format!("refund from unknown {period}")))?;
        let amount = record.deposit_of(&account, asset);
        let new_total = record.total(asset).checked_sub(amount).ok_or_else(|| {
            AuctionError::Internal(format!("{asset} pool of {period} smaller than a deposit"))
        })?;

        record.pool_mut(asset).total = new_total;
        let position = record.position_mut(account);
        *position.deposit_mut(asset) = U256::ZERO;
        position.mark_withdrawn(asset);
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: u64) -> Amount {
        U256::from(n)
    }

    #[test]
    fn untouched_period_reads_zero() {
        let ledger = PeriodLedger::new();
        assert!(ledger.period(PeriodId(3)).is_none());
        assert!(ledger.total(PeriodId(3), Asset::Native).is_zero());
        assert!(ledger.deposit_of(PeriodId(3), &AccountId::new(), Asset::Token).is_zero());
    }

    #[test]
    fn deposits_accumulate() {
        let mut ledger = PeriodLedger::new();
        let alice = AccountId::new();
        ledger.record_deposit(PeriodId(2), alice, Asset::Native, units(8)).unwrap();
        let after = ledger.record_deposit(PeriodId(2), alice, Asset::Native, units(3)).unwrap();
        assert_eq!(after, units(11));
        assert_eq!(ledger.total(PeriodId(2), Asset::Native), units(11));
        assert!(ledger.total(PeriodId(2), Asset::Token).is_zero());
    }

    #[test]
    fn check_deposit_rules() {
        let ledger = PeriodLedger::new();
        let running = StopSwitch::new();
        let current = PeriodId(1);

        assert_eq!(
            ledger.check_deposit(PeriodId(1), current, U256::ZERO, &running).unwrap_err(),
            AuctionError::EmptyDeposit
        );
        assert!(matches!(
            ledger.check_deposit(PeriodId(0), current, units(1), &running).unwrap_err(),
            AuctionError::PastPeriod { .. }
        ));
        assert!(ledger.check_deposit(PeriodId(1), current, units(1), &running).is_ok());
        assert!(ledger.check_deposit(PeriodId(9), current, units(1), &running).is_ok());

        let mut stopped = StopSwitch::new();
        stopped.engage().unwrap();
        assert_eq!(
            ledger.check_deposit(PeriodId(1), current, units(1), &stopped).unwrap_err(),
            AuctionError::Halted
        );
    }

    #[test]
    fn overflowing_deposit_writes_nothing() {
        let mut ledger = PeriodLedger::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        ledger.record_deposit(PeriodId(0), alice, Asset::Token, U256::MAX).unwrap();
        let err = ledger.record_deposit(PeriodId(0), bob, Asset::Token, units(1)).unwrap_err();
        assert!(matches!(err, AuctionError::Arithmetic { .. }));
        assert!(ledger.deposit_of(PeriodId(0), &bob, Asset::Token).is_zero());
        assert_eq!(ledger.total(PeriodId(0), Asset::Token), U256::MAX);
    }

    #[test]
    fn reward_marks_flag_and_counters() {
        let mut ledger = PeriodLedger::new();
        let alice = AccountId::new();
        ledger.record_deposit(PeriodId(2), alice, Asset::Token, units(20)).unwrap();
        let breakdown = ReturnBreakdown {
            gross: units(8),
            fee: units(1),
            net: units(7),
        };
        ledger.record_reward(PeriodId(2), alice, Asset::Native, &breakdown).unwrap();

        assert!(ledger.payout_claimed(PeriodId(2), &alice, Asset::Native));
        assert!(!ledger.payout_claimed(PeriodId(2), &alice, Asset::Token));
        let pool = &ledger.period(PeriodId(2)).unwrap().native;
        assert_eq!(pool.rewards_paid, units(7));
        assert_eq!(pool.fees_taken, units(1));
        assert_eq!(pool.claimants, 1);
    }

    #[test]
    fn refund_zeroes_deposit_and_shrinks_pool() {
        let mut ledger = PeriodLedger::new();
        let alice = AccountId::new();
        let bob = AccountId::new();
        ledger.record_deposit(PeriodId(2), alice, Asset::Native, units(24)).unwrap();
        ledger.record_deposit(PeriodId(2), bob, Asset::Native, units(6)).unwrap();

        let refunded = ledger.record_refund(PeriodId(2), alice, Asset::Native).unwrap();
        assert_eq!(refunded, units(24));
        assert!(ledger.deposit_of(PeriodId(2), &alice, Asset::Native).is_zero());
        assert_eq!(ledger.total(PeriodId(2), Asset::Native), units(6));
        assert!(ledger.withdrawn(PeriodId(2), &alice, Asset::Native));
        assert!(!ledger.payout_claimed(PeriodId(2), &alice, Asset::Token));
    }

    #[test]
    fn conservation_holds_after_mixed_operations() {
        let mut ledger = PeriodLedger::new();
        let users: Vec<AccountId> = (0..4).map(|_| AccountId::new()).collect();
        for (i, user) in users.iter().enumerate() {
            let n = u64::try_from(i).unwrap() + 1;
            ledger.record_deposit(PeriodId(0), *user, Asset::Native, units(n * 10)).unwrap();
            ledger.record_deposit(PeriodId(0), *user, Asset::Token, units(n)).unwrap();
        }
        ledger.record_refund(PeriodId(0), users[1], Asset::Native).unwrap();

        let period = ledger.period(PeriodId(0)).unwrap();
        for asset in Asset::both() {
            assert_eq!(period.total(asset), period.sum_of_deposits(asset));
        }
    }
}
