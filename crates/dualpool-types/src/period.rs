//! Per-period records.
//!
//! A [`Period`] is created with zero values the first time a deposit names
//! its id and is never removed. Users don't own anything in it: they hold
//! claims keyed by their [`AccountId`] in the [`Position`] map.
//!
//! Flags on a position are one-way: once set to `true` they are never
//! cleared.

use std::collections::BTreeMap;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, Asset};

/// One asset's pool within a period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPool {
    /// Sum of all outstanding deposits of this asset. Only decreases on a
    /// principal withdrawal.
    pub total: Amount,
    /// Net rewards paid out of this pool to depositors of the other asset.
    pub rewards_paid: Amount,
    /// Fees diverted from this pool to the owner vault.
    pub fees_taken: Amount,
    /// Number of rewards paid out of this pool.
    pub claimants: u64,
}

/// A single account's stake in one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub native_deposit: Amount,
    pub token_deposit: Amount,
    /// Token reward (for a native deposit) has been paid.
    pub token_payout_claimed: bool,
    /// Native reward (for a token deposit) has been paid.
    pub native_payout_claimed: bool,
    pub native_withdrawn: bool,
    pub token_withdrawn: bool,
}

impl Position {
    /// The account's own deposit of `asset`.
    #[must_use]
    pub fn deposit(&self, asset: Asset) -> Amount {
        match asset {
            Asset::Native => self.native_deposit,
            Asset::Token => self.token_deposit,
        }
    }

    pub fn deposit_mut(&mut self, asset: Asset) -> &mut Amount {
        match asset {
            Asset::Native => &mut self.native_deposit,
            Asset::Token => &mut self.token_deposit,
        }
    }

    /// Whether the reward paid in `reward_asset` has been claimed.
    #[must_use]
    pub fn payout_claimed(&self, reward_asset: Asset) -> bool {
        match reward_asset {
            Asset::Native => self.native_payout_claimed,
            Asset::Token => self.token_payout_claimed,
        }
    }

    pub fn mark_payout_claimed(&mut self, reward_asset: Asset) {
        match reward_asset {
            Asset::Native => self.native_payout_claimed = true,
            Asset::Token => self.token_payout_claimed = true,
        }
    }

    /// Whether the principal of `asset` has been refunded.
    #[must_use]
    pub fn withdrawn(&self, asset: Asset) -> bool {
        match asset {
            Asset::Native => self.native_withdrawn,
            Asset::Token => self.token_withdrawn,
        }
    }

    pub fn mark_withdrawn(&mut self, asset: Asset) {
        match asset {
            Asset::Native => self.native_withdrawn = true,
            Asset::Token => self.token_withdrawn = true,
        }
    }
}

/// Storage of one period: both pools plus every account's position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub native: AssetPool,
    pub token: AssetPool,
    /// Per-account positions, ordered for deterministic iteration.
    pub positions: BTreeMap<AccountId, Position>,
}

impl Period {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pool(&self, asset: Asset) -> &AssetPool {
        match asset {
            Asset::Native => &self.native,
            Asset::Token => &self.token,
        }
    }

    pub fn pool_mut(&mut self, asset: Asset) -> &mut AssetPool {
        match asset {
            Asset::Native => &mut self.native,
            Asset::Token => &mut self.token,
        }
    }

    /// Pool total for `asset`.
    #[must_use]
    pub fn total(&self, asset: Asset) -> Amount {
        self.pool(asset).total
    }

    /// An account's position; absent accounts read as an empty position.
    #[must_use]
    pub fn position(&self, account: &AccountId) -> Position {
        self.positions.get(account).cloned().unwrap_or_default()
    }

    pub fn position_mut(&mut self, account: AccountId) -> &mut Position {
        self.positions.entry(account).or_default()
    }

    /// An account's deposit of `asset`.
    #[must_use]
    pub fn deposit_of(&self, account: &AccountId, asset: Asset) -> Amount {
        self.positions
            .get(account)
            .map_or(U256::ZERO, |p| p.deposit(asset))
    }

    /// Sum of every position's deposit of `asset`, saturating.
    #[must_use]
    pub fn sum_of_deposits(&self, asset: Asset) -> Amount {
        self.positions
            .values()
            .fold(U256::ZERO, |acc, p| acc.saturating_add(p.deposit(asset)))
    }
}
