//! Shared harness for the integration tests.

#![allow(dead_code)]

use std::time::Duration;

use alloy_primitives::U256;
use chrono::{DateTime, TimeZone, Utc};
use dualpool_ledger::{InMemoryNativeBank, InMemoryTokenLedger, ManualClock, NativeBank, TokenLedger};
use dualpool_settlement::Auction;
use dualpool_types::{AccountId, Amount, AuctionConfig, Call, FeeRate, PeriodId, Result};
use rust_decimal::Decimal;

pub type TestAuction = Auction<ManualClock, InMemoryTokenLedger, InMemoryNativeBank>;

pub const PERIOD: Duration = Duration::from_secs(3600);

const ETHER: u64 = 1_000_000_000_000_000_000;

/// `n × 10^18`
pub fn ether(n: u64) -> Amount {
    U256::from(n) * U256::from(ETHER)
}

pub fn genesis() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn percent(p: i64) -> FeeRate {
    FeeRate::from_percent(Decimal::new(p, 0)).unwrap()
}

/// One auction on a manual clock with in-memory collaborators.
pub struct Harness {
    pub auction: TestAuction,
    pub clock: ManualClock,
    pub owner: AccountId,
}

impl Harness {
    pub fn new(fee: FeeRate) -> Self {
        let clock = ManualClock::new(genesis());
        let owner = AccountId::new();
        let config = AuctionConfig::new(genesis(), PERIOD, owner).with_fee(fee);
        let custodian = config.auction_account;
        let auction = Auction::new(
            config,
            clock.clone(),
            InMemoryTokenLedger::new(custodian),
            InMemoryNativeBank::new(custodian),
        )
        .unwrap();
        Self {
            auction,
            clock,
            owner,
        }
    }

    /// A fresh account holding a million of each asset.
    pub fn user(&mut self) -> AccountId {
        let user = AccountId::new();
        self.auction
            .token_ledger_mut()
            .mint(user, ether(1_000_000))
            .unwrap();
        self.auction
            .native_bank_mut()
            .fund(user, ether(1_000_000))
            .unwrap();
        user
    }

    fn custodian(&self) -> AccountId {
        self.auction.config().auction_account
    }

    /// Native deposit; the value moves only if the auction accepts the call.
    pub fn deposit_native(&mut self, user: AccountId, period: PeriodId, amount: Amount) -> Result<()> {
        self.auction
            .deposit_native(Call::new(user).with_value(amount), period)?;
        self.auction.native_bank_mut().receive(user, amount)
    }

    /// Approve exactly `amount` and deposit it.
    pub fn deposit_token(&mut self, user: AccountId, period: PeriodId, amount: Amount) -> Result<()> {
        let custodian = self.custodian();
        self.auction
            .token_ledger_mut()
            .approve(user, custodian, amount);
        self.auction.deposit_token(Call::new(user), period, amount)
    }

    /// Move the clock to the first instant of `period`.
    pub fn enter_period(&self, period: u64) {
        let offset = chrono::Duration::from_std(PERIOD * u32::try_from(period).unwrap()).unwrap();
        self.clock.set(genesis() + offset);
    }

    pub fn native_balance(&self, account: &AccountId) -> Amount {
        self.auction.native_bank().balance_of(account)
    }

    pub fn token_balance(&self, account: &AccountId) -> Amount {
        self.auction.token_ledger().balance_of(account)
    }
}
