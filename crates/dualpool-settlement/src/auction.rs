//! The auction facade.
//!
//! [`Auction`] owns the ledger plane and the external collaborators and
//! exposes every operation a participant or the owner can invoke. Each
//! write follows the same protocol:
//!
//! ```text
//! validate (no writes) → external transfer → commit ledger → receipt
//! ```
//!
//! A failed validation or transfer returns before anything is written, so a
//! rejected operation has no effect. Native deposits are the exception to
//! the transfer step: the value arrives with the call and the host is
//! expected to bounce it if the operation fails.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dualpool_ledger::{
    Clock, NativeBank, OwnerRewardVault, PeriodLedger, StopSwitch, TimeKeeper, TokenLedger,
};
use dualpool_types::{
    AccountId, Amount, Asset, AuctionConfig, AuctionError, Call, FeeRate, Period, PeriodId,
    Position, Receipt, ReceiptDraft, ReceiptKind, Result, ReturnBreakdown,
};

use crate::claim::ClaimEngine;
use crate::conservation::ConservationAudit;
use crate::snapshot::LedgerSnapshot;
use crate::withdrawal::PrincipalWithdrawalEngine;

/// A periodic dual-asset auction.
pub struct Auction<C, T, N> {
    config: AuctionConfig,
    time: TimeKeeper,
    clock: C,
    token: T,
    native: N,
    ledger: PeriodLedger,
    vault: OwnerRewardVault,
    stop: StopSwitch,
    claims: ClaimEngine,
    withdrawals: PrincipalWithdrawalEngine,
    receipts: Vec<Receipt>,
}

impl<C: Clock, T: TokenLedger, N: NativeBank> Auction<C, T, N> {
    /// Create a fresh auction.
    ///
    /// # Errors
    /// Returns `Configuration` if `config` fails validation.
    pub fn new(config: AuctionConfig, clock: C, token: T, native: N) -> Result<Self> {
        Self::assemble(
            config,
            clock,
            token,
            native,
            PeriodLedger::new(),
            OwnerRewardVault::new(),
            StopSwitch::new(),
            Vec::new(),
        )
    }

    /// Rebuild an auction from a snapshot, attaching fresh collaborators.
    pub fn restore(snapshot: LedgerSnapshot, clock: C, token: T, native: N) -> Result<Self> {
        let audit = ConservationAudit::new();
        for (id, period) in &snapshot.periods {
            audit.check_totals(*id, period)?;
        }
        let ledger = PeriodLedger::from_periods(snapshot.periods);
        let auction = Self::assemble(
            snapshot.config,
            clock,
            token,
            native,
            ledger,
            snapshot.vault,
            StopSwitch::from_state(snapshot.stopped),
            snapshot.receipts,
        )?;
        tracing::info!(
            periods = auction.ledger.periods().count(),
            receipts = auction.receipts.len(),
            stopped = auction.stop.is_stopped(),
            "auction restored from snapshot"
        );
        Ok(auction)
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        config: AuctionConfig,
        clock: C,
        token: T,
        native: N,
        ledger: PeriodLedger,
        vault: OwnerRewardVault,
        stop: StopSwitch,
        receipts: Vec<Receipt>,
    ) -> Result<Self> {
        config.validate()?;
        let time = TimeKeeper::from_config(&config)?;
        if config.fee.exceeds_full_percent() {
            tracing::warn!(
                fee = %config.fee,
                "fee exceeds 100%; every claim will fail"
            );
        }
        tracing::info!(
            genesis = %config.genesis,
            period_length = ?config.period_length,
            fee = %config.fee,
            owner = %config.owner,
            "auction configured"
        );
        Ok(Self {
            claims: ClaimEngine::new(config.fee),
            withdrawals: PrincipalWithdrawalEngine::new(),
            config,
            time,
            clock,
            token,
            native,
            ledger,
            vault,
            stop,
            receipts,
        })
    }

    /// Capture the persistent state.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            config: self.config.clone(),
            periods: self
                .ledger
                .periods()
                .map(|(id, period)| (*id, period.clone()))
                .collect(),
            vault: self.vault.clone(),
            stopped: self.stop.is_stopped(),
            receipts: self.receipts.clone(),
            taken_at: self.clock.now(),
        }
    }

    // =================================================================
    // Read surface
    // =================================================================

    #[must_use]
    pub fn config(&self) -> &AuctionConfig {
        &self.config
    }

    #[must_use]
    pub fn genesis(&self) -> DateTime<Utc> {
        self.time.genesis()
    }

    #[must_use]
    pub fn period_length(&self) -> Duration {
        self.time.period_length()
    }

    #[must_use]
    pub fn fee(&self) -> FeeRate {
        self.config.fee
    }

    #[must_use]
    pub fn owner(&self) -> AccountId {
        self.config.owner
    }

    /// The period containing the clock's current instant.
    ///
    /// # Errors
    /// Returns `NotStarted` before genesis.
    pub fn current_period_id(&self) -> Result<PeriodId> {
        self.time.current_period(&self.clock)
    }

    /// First instant of `period`.
    #[must_use]
    pub fn period_start(&self, period: PeriodId) -> Option<DateTime<Utc>> {
        self.time.period_start(period)
    }

    /// Instant from which `period` can be claimed.
    #[must_use]
    pub fn period_end(&self, period: PeriodId) -> Option<DateTime<Utc>> {
        self.time.period_end(period)
    }

    #[must_use]
    pub fn period(&self, period: PeriodId) -> Option<&Period> {
        self.ledger.period(period)
    }

    #[must_use]
    pub fn ledger(&self) -> &PeriodLedger {
        &self.ledger
    }

    #[must_use]
    pub fn total_native_deposits(&self, period: PeriodId) -> Amount {
        self.ledger.total(period, Asset::Native)
    }

    #[must_use]
    pub fn total_token_deposits(&self, period: PeriodId) -> Amount {
        self.ledger.total(period, Asset::Token)
    }

    #[must_use]
    pub fn native_deposit_of(&self, period: PeriodId, account: &AccountId) -> Amount {
        self.ledger.deposit_of(period, account, Asset::Native)
    }

    #[must_use]
    pub fn token_deposit_of(&self, period: PeriodId, account: &AccountId) -> Amount {
        self.ledger.deposit_of(period, account, Asset::Token)
    }

    #[must_use]
    pub fn position(&self, period: PeriodId, account: &AccountId) -> Position {
        self.ledger.position(period, account)
    }

    /// Whether `account` received its native reward (for a token deposit).
    #[must_use]
    pub fn native_payout_claimed(&self, period: PeriodId, account: &AccountId) -> bool {
        self.ledger.payout_claimed(period, account, Asset::Native)
    }

    /// Whether `account` received its token reward (for a native deposit).
    #[must_use]
    pub fn token_payout_claimed(&self, period: PeriodId, account: &AccountId) -> bool {
        self.ledger.payout_claimed(period, account, Asset::Token)
    }

    #[must_use]
    pub fn native_withdrawn(&self, period: PeriodId, account: &AccountId) -> bool {
        self.ledger.withdrawn(period, account, Asset::Native)
    }

    #[must_use]
    pub fn token_withdrawn(&self, period: PeriodId, account: &AccountId) -> bool {
        self.ledger.withdrawn(period, account, Asset::Token)
    }

    #[must_use]
    pub fn owner_native_reward(&self) -> Amount {
        self.vault.accrued(Asset::Native)
    }

    #[must_use]
    pub fn owner_token_reward(&self) -> Amount {
        self.vault.accrued(Asset::Token)
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Native reward before fees for `account`'s token deposit.
    ///
    /// # Errors
    /// Returns `Arithmetic` if nobody deposited tokens in `period`.
    pub fn calculate_gross_native_return(
        &self,
        period: PeriodId,
        account: &AccountId,
    ) -> Result<Amount> {
        self.claims
            .gross_return(&self.ledger, period, account, Asset::Native)
    }

    /// Fee and net of the native reward for `account`'s token deposit.
    pub fn calculate_native_return(
        &self,
        period: PeriodId,
        account: &AccountId,
    ) -> Result<ReturnBreakdown> {
        self.claims
            .calculate_return(&self.ledger, period, account, Asset::Native)
    }

    /// Token reward before fees for `account`'s native deposit.
    ///
    /// # Errors
    /// Returns `Arithmetic` if nobody deposited native value in `period`.
    pub fn calculate_gross_token_return(
        &self,
        period: PeriodId,
        account: &AccountId,
    ) -> Result<Amount> {
        self.claims
            .gross_return(&self.ledger, period, account, Asset::Token)
    }

    /// Fee and net of the token reward for `account`'s native deposit.
    pub fn calculate_token_return(
        &self,
        period: PeriodId,
        account: &AccountId,
    ) -> Result<ReturnBreakdown> {
        self.claims
            .calculate_return(&self.ledger, period, account, Asset::Token)
    }

    /// Every committed action, oldest first.
    #[must_use]
    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    #[must_use]
    pub fn token_ledger(&self) -> &T {
        &self.token
    }

    /// Host-side access to the token collaborator (minting, approvals).
    pub fn token_ledger_mut(&mut self) -> &mut T {
        &mut self.token
    }

    #[must_use]
    pub fn native_bank(&self) -> &N {
        &self.native
    }

    /// Host-side access to the native collaborator (crediting call value).
    pub fn native_bank_mut(&mut self) -> &mut N {
        &mut self.native
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run the conservation checks against the ledger and both custody
    /// balances.
    pub fn audit(&self) -> Result<()> {
        let audit = ConservationAudit::new();
        audit.check_ledger(&self.ledger)?;
        let custodian = self.config.auction_account;
        audit.verify_custody(
            &self.ledger,
            &self.vault,
            Asset::Native,
            self.native.balance_of(&custodian),
        )?;
        audit.verify_custody(
            &self.ledger,
            &self.vault,
            Asset::Token,
            self.token.balance_of(&custodian),
        )
    }

    // =================================================================
    // Deposits
    // =================================================================

    /// Deposit the call's native value into `period`.
    ///
    /// # Errors
    /// `Halted`, `NotStarted`, `EmptyDeposit` or `PastPeriod`.
    pub fn deposit_native(&mut self, call: Call, period: PeriodId) -> Result<()> {
        self.check_deposits_open(&call, period)?;
        let current = self.current_period_id()?;
        self.ledger
            .check_deposit(period, current, call.value, &self.stop)
            .inspect_err(|e| rejected("native deposit", period, &call, e))?;
        self.commit_deposit(call.sender, period, Asset::Native, call.value)
    }

    /// Deposit the call's native value into the current period.
    pub fn deposit_native_current(&mut self, call: Call) -> Result<()> {
        self.stop.check_deposits_open()?;
        let current = self.current_period_id()?;
        self.deposit_native(call, current)
    }

    /// Bare value transfer to the auction: same as
    /// [`Self::deposit_native_current`].
    pub fn receive(&mut self, call: Call) -> Result<()> {
        self.deposit_native_current(call)
    }

    /// Pull `amount` tokens from the caller into `period`.
    ///
    /// # Errors
    /// `UnexpectedNativeValue`, `Halted`, `NotStarted`, `EmptyDeposit`,
    /// `PastPeriod`, or `TransferFailed` when the token ledger refuses.
    pub fn deposit_token(&mut self, call: Call, period: PeriodId, amount: Amount) -> Result<()> {
        call.ensure_no_value()?;
        self.check_deposits_open(&call, period)?;
        let current = self.current_period_id()?;
        self.ledger
            .check_deposit(period, current, amount, &self.stop)
            .inspect_err(|e| rejected("token deposit", period, &call, e))?;
        // Recording can't fail once the tokens have moved.
        self.ledger
            .total(period, Asset::Token)
            .checked_add(amount)
            .ok_or_else(|| AuctionError::arithmetic(format!("token pool overflow in {period}")))?;
        self.token
            .transfer_from(call.sender, self.config.auction_account, amount)
            .inspect_err(|e| tracing::warn!(sender = %call.sender, error = %e, "token pull failed"))?;
        self.commit_deposit(call.sender, period, Asset::Token, amount)
    }

    /// Pull `amount` tokens from the caller into the current period.
    pub fn deposit_token_current(&mut self, call: Call, amount: Amount) -> Result<()> {
        call.ensure_no_value()?;
        self.stop.check_deposits_open()?;
        let current = self.current_period_id()?;
        self.deposit_token(call, current, amount)
    }

    // Halt is reported ahead of every other deposit rule, even before genesis.
    fn check_deposits_open(&self, call: &Call, period: PeriodId) -> Result<()> {
        self.stop
            .check_deposits_open()
            .inspect_err(|e| rejected("deposit", period, call, e))
    }

    fn commit_deposit(
        &mut self,
        account: AccountId,
        period: PeriodId,
        asset: Asset,
        amount: Amount,
    ) -> Result<()> {
        let position = self.ledger.record_deposit(period, account, asset, amount)?;
        tracing::info!(
            period = %period,
            account = %account,
            asset = %asset,
            %amount,
            %position,
            "deposit accepted"
        );
        self.issue(ReceiptDraft {
            kind: ReceiptKind::Deposit,
            period: Some(period),
            account,
            asset: Some(asset),
            amount,
            fee: Amount::ZERO,
        });
        Ok(())
    }

    // =================================================================
    // Reward claims
    // =================================================================

    /// Claim the native reward for the caller's token deposit in a closed
    /// period. Returns what was paid.
    ///
    /// # Errors
    /// `UnexpectedNativeValue`, `NotStarted`, `PeriodNotFinished`,
    /// `MissingOwnDeposit`, `MissingCounterpartDeposits`, `AlreadyClaimed`,
    /// `Arithmetic` or `TransferFailed`.
    pub fn claim_native_reward(&mut self, call: Call, period: PeriodId) -> Result<ReturnBreakdown> {
        self.claim(call, period, Asset::Native)
    }

    /// Claim the token reward for the caller's native deposit in a closed
    /// period.
    pub fn claim_token_reward(&mut self, call: Call, period: PeriodId) -> Result<ReturnBreakdown> {
        self.claim(call, period, Asset::Token)
    }

    fn claim(&mut self, call: Call, period: PeriodId, reward_asset: Asset) -> Result<ReturnBreakdown> {
        call.ensure_no_value()?;
        let current = self.current_period_id()?;
        let plan = self
            .claims
            .prepare(
                &self.ledger,
                &self.vault,
                period,
                current,
                call.sender,
                reward_asset,
            )
            .inspect_err(|e| rejected("claim", period, &call, e))?;

        self.pay(reward_asset, call.sender, plan.breakdown.net)?;
        self.claims.commit(&mut self.ledger, &mut self.vault, &plan)?;

        tracing::info!(
            period = %period,
            account = %call.sender,
            asset = %reward_asset,
            net = %plan.breakdown.net,
            fee = %plan.breakdown.fee,
            "reward claimed"
        );
        self.issue(ReceiptDraft {
            kind: ReceiptKind::RewardClaimed,
            period: Some(period),
            account: call.sender,
            asset: Some(reward_asset),
            amount: plan.breakdown.net,
            fee: plan.breakdown.fee,
        });
        Ok(plan.breakdown)
    }

    // =================================================================
    // Principal withdrawals
    // =================================================================

    /// Refund the caller's native deposit in `period`.
    ///
    /// # Errors
    /// `UnexpectedNativeValue`, `NotStarted`, `AlreadyWithdrawn`,
    /// `MissingOwnDeposit`, `NeitherHaltedNorEmptyCounterpart` or
    /// `TransferFailed`.
    pub fn withdraw_native_deposit(&mut self, call: Call, period: PeriodId) -> Result<Amount> {
        self.withdraw_principal(call, period, Asset::Native)
    }

    /// Refund the caller's token deposit in `period`.
    pub fn withdraw_token_deposit(&mut self, call: Call, period: PeriodId) -> Result<Amount> {
        self.withdraw_principal(call, period, Asset::Token)
    }

    fn withdraw_principal(&mut self, call: Call, period: PeriodId, asset: Asset) -> Result<Amount> {
        call.ensure_no_value()?;
        let current = self.current_period_id()?;
        let plan = self
            .withdrawals
            .prepare(&self.ledger, &self.stop, period, current, call.sender, asset)
            .inspect_err(|e| rejected("principal withdrawal", period, &call, e))?;

        self.pay(asset, call.sender, plan.amount)?;
        let refunded = self.withdrawals.commit(&mut self.ledger, &plan)?;

        tracing::info!(
            period = %period,
            account = %call.sender,
            asset = %asset,
            amount = %refunded,
            stopped = self.stop.is_stopped(),
            "principal withdrawn"
        );
        self.issue(ReceiptDraft {
            kind: ReceiptKind::PrincipalWithdrawn,
            period: Some(period),
            account: call.sender,
            asset: Some(asset),
            amount: refunded,
            fee: Amount::ZERO,
        });
        Ok(refunded)
    }

    // =================================================================
    // Owner operations
    // =================================================================

    /// Engage the stop switch. Irreversible.
    ///
    /// # Errors
    /// `UnexpectedNativeValue`, `NotOwner`, then `AlreadyStopped`.
    pub fn stop(&mut self, call: Call) -> Result<()> {
        call.ensure_no_value()?;
        self.ensure_owner(&call)?;
        self.stop.engage()?;
        tracing::warn!(owner = %call.sender, "auction stopped");
        self.issue(ReceiptDraft {
            kind: ReceiptKind::Stopped,
            period: None,
            account: call.sender,
            asset: None,
            amount: Amount::ZERO,
            fee: Amount::ZERO,
        });
        Ok(())
    }

    /// Pay all accrued native fees to `beneficiary`.
    ///
    /// # Errors
    /// `UnexpectedNativeValue`, `NotOwner` or `TransferFailed`.
    pub fn withdraw_owner_native_reward(
        &mut self,
        call: Call,
        beneficiary: AccountId,
    ) -> Result<Amount> {
        self.withdraw_owner_reward(call, beneficiary, Asset::Native)
    }

    /// Pay all accrued token fees to `beneficiary`.
    pub fn withdraw_owner_token_reward(
        &mut self,
        call: Call,
        beneficiary: AccountId,
    ) -> Result<Amount> {
        self.withdraw_owner_reward(call, beneficiary, Asset::Token)
    }

    fn withdraw_owner_reward(
        &mut self,
        call: Call,
        beneficiary: AccountId,
        asset: Asset,
    ) -> Result<Amount> {
        call.ensure_no_value()?;
        self.ensure_owner(&call)?;
        let amount = self.vault.accrued(asset);

        self.pay(asset, beneficiary, amount)?;
        let taken = self.vault.take(asset);

        tracing::info!(asset = %asset, beneficiary = %beneficiary, amount = %taken, "owner fees withdrawn");
        self.issue(ReceiptDraft {
            kind: ReceiptKind::OwnerFeeWithdrawn,
            period: None,
            account: beneficiary,
            asset: Some(asset),
            amount: taken,
            fee: Amount::ZERO,
        });
        Ok(taken)
    }

    fn ensure_owner(&self, call: &Call) -> Result<()> {
        if call.sender != self.config.owner {
            return Err(AuctionError::NotOwner(call.sender));
        }
        Ok(())
    }

    // =================================================================
    // Internals
    // =================================================================

    /// Send `amount` of `asset` from the auction account to `to`.
    fn pay(&mut self, asset: Asset, to: AccountId, amount: Amount) -> Result<()> {
        let result = match asset {
            Asset::Native => self.native.pay(to, amount),
            Asset::Token => self.token.transfer(to, amount),
        };
        result.inspect_err(|e| {
            tracing::warn!(asset = %asset, recipient = %to, %amount, error = %e, "payout failed");
        })
    }

    fn issue(&mut self, draft: ReceiptDraft) {
        let sequence = self.receipts.len() as u64;
        let receipt = Receipt::seal(draft, sequence, self.clock.now());
        tracing::debug!(
            sequence,
            kind = %receipt.kind,
            digest = %receipt.digest_hex(),
            "receipt issued"
        );
        self.receipts.push(receipt);
    }
}

fn rejected(operation: &str, period: PeriodId, call: &Call, error: &AuctionError) {
    tracing::debug!(operation, period = %period, account = %call.sender, %error, "rejected");
}

impl<C, T, N> std::fmt::Debug for Auction<C, T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auction")
            .field("config", &self.config)
            .field("periods", &self.ledger.periods().count())
            .field("vault", &self.vault)
            .field("stopped", &self.stop.is_stopped())
            .field("receipts", &self.receipts.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use chrono::TimeZone;
    use dualpool_ledger::{InMemoryNativeBank, InMemoryTokenLedger, ManualClock};

    type TestAuction = Auction<ManualClock, InMemoryTokenLedger, InMemoryNativeBank>;

    const HOUR: Duration = Duration::from_secs(3600);

    fn units(n: u64) -> Amount {
        U256::from(n)
    }

    fn setup() -> (TestAuction, ManualClock, AccountId) {
        let genesis = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(genesis);
        let owner = AccountId::new();
        let config = AuctionConfig::new(genesis, HOUR, owner);
        let custodian = config.auction_account;
        let auction = Auction::new(
            config,
            clock.clone(),
            InMemoryTokenLedger::new(custodian),
            InMemoryNativeBank::new(custodian),
        )
        .unwrap();
        (auction, clock, owner)
    }

    #[test]
    fn native_deposit_records_and_issues_receipt() {
        let (mut auction, _, _) = setup();
        let alice = AccountId::new();
        auction
            .deposit_native_current(Call::new(alice).with_value(units(5)))
            .unwrap();
        assert_eq!(auction.native_deposit_of(PeriodId(0), &alice), units(5));
        assert_eq!(auction.receipts().len(), 1);
        assert_eq!(auction.receipts()[0].kind, ReceiptKind::Deposit);
        assert!(auction.receipts()[0].verify());
    }

    #[test]
    fn deposit_before_genesis_not_started() {
        let genesis = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(genesis - chrono::Duration::minutes(5));
        let config = AuctionConfig::new(genesis, HOUR, AccountId::new());
        let custodian = config.auction_account;
        let mut auction = Auction::new(
            config,
            clock,
            InMemoryTokenLedger::new(custodian),
            InMemoryNativeBank::new(custodian),
        )
        .unwrap();
        let err = auction
            .receive(Call::new(AccountId::new()).with_value(units(1)))
            .unwrap_err();
        assert_eq!(err, AuctionError::NotStarted);
    }

    #[test]
    fn token_deposit_rejects_native_value() {
        let (mut auction, _, _) = setup();
        let err = auction
            .deposit_token_current(Call::new(AccountId::new()).with_value(units(1)), units(3))
            .unwrap_err();
        assert_eq!(err, AuctionError::UnexpectedNativeValue);
        assert!(auction.receipts().is_empty());
    }

    #[test]
    fn failed_token_pull_leaves_no_trace() {
        let (mut auction, _, _) = setup();
        let alice = AccountId::new();
        auction.token_ledger_mut().mint(alice, units(10)).unwrap();
        let err = auction
            .deposit_token_current(Call::new(alice), units(3))
            .unwrap_err();
        assert!(matches!(err, AuctionError::TransferFailed { .. }));
        assert!(auction.total_token_deposits(PeriodId(0)).is_zero());
        assert!(auction.period(PeriodId(0)).is_none());
    }

    #[test]
    fn claim_in_open_period_rejected() {
        let (mut auction, _, _) = setup();
        let err = auction
            .claim_native_reward(Call::new(AccountId::new()), PeriodId(0))
            .unwrap_err();
        assert!(matches!(err, AuctionError::PeriodNotFinished { .. }));
    }

    #[test]
    fn stop_requires_owner_then_once() {
        let (mut auction, _, owner) = setup();
        let stranger = AccountId::new();
        assert_eq!(
            auction.stop(Call::new(stranger)).unwrap_err(),
            AuctionError::NotOwner(stranger)
        );
        auction.stop(Call::new(owner)).unwrap();
        assert!(auction.is_stopped());
        assert_eq!(
            auction.stop(Call::new(owner)).unwrap_err(),
            AuctionError::AlreadyStopped
        );
        // non-owner still sees NotOwner after stop
        assert_eq!(
            auction.stop(Call::new(stranger)).unwrap_err(),
            AuctionError::NotOwner(stranger)
        );
    }

    #[test]
    fn period_bounds_follow_clock() {
        let (auction, clock, _) = setup();
        clock.advance(HOUR * 3 + Duration::from_secs(1));
        assert_eq!(auction.current_period_id().unwrap(), PeriodId(3));
        assert_eq!(auction.period_end(PeriodId(3)), auction.period_start(PeriodId(4)));
        assert_eq!(auction.period_end(PeriodId(u64::MAX)), None);
    }

    #[test]
    fn owner_withdraw_of_empty_vault_is_zero() {
        let (mut auction, _, owner) = setup();
        let paid = auction
            .withdraw_owner_native_reward(Call::new(owner), owner)
            .unwrap();
        assert!(paid.is_zero());
    }
}
