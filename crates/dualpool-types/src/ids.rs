//! Identifiers used throughout Dualpool.
//!
//! Accounts use UUIDv7 for time-ordered lexicographic sorting; periods are a
//! gapless, zero-based counter derived from the clock.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Identity of a depositor, the owner, a fee beneficiary, or the auction itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PeriodId
// ---------------------------------------------------------------------------

/// Zero-based index of a fixed-length period counted from genesis.
///
/// Period `n` covers `[genesis + n·len, genesis + (n+1)·len)`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct PeriodId(pub u64);

impl PeriodId {
    /// The first period, starting at genesis.
    pub const GENESIS: Self = Self(0);

    /// The following period, or `None` past `u64::MAX`.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Whether this period is strictly before `other`, i.e. closed once
    /// `other` is the current period.
    #[must_use]
    pub fn is_before(self, other: Self) -> bool {
        self.0 < other.0
    }
}

impl From<u64> for PeriodId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "period:{}", self.0)
    }
}
