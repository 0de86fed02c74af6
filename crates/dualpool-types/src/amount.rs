//! Amount, asset and fee types.
//!
//! Amounts are 256-bit unsigned integers in the smallest unit of each asset,
//! so products of two 10^18-scaled amounts never leave the representable
//! range. All arithmetic on them is checked.

use std::fmt;

use alloy_primitives::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::{AuctionError, Result, constants};

/// An amount of either asset in its smallest unit.
pub type Amount = U256;

/// The two asset classes the auction exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Asset {
    /// The native currency, attached to calls as value.
    Native,
    /// The fungible token, moved through the token ledger.
    Token,
}

impl Asset {
    /// The asset on the other side of the auction.
    #[must_use]
    pub fn counterpart(self) -> Self {
        match self {
            Self::Native => Self::Token,
            Self::Token => Self::Native,
        }
    }

    /// Both assets, native first.
    #[must_use]
    pub fn both() -> [Self; 2] {
        [Self::Native, Self::Token]
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "NATIVE"),
            Self::Token => write!(f, "TOKEN"),
        }
    }
}

// ---------------------------------------------------------------------------
// FeeRate
// ---------------------------------------------------------------------------

/// Fee fraction as a fixed-point numerator over [`constants::FULL_PERCENT`].
///
/// `FeeRate(12 × 10^18)` is 12%. The numerator is not bounded: a value above
/// `FULL_PERCENT` is representable and makes every non-zero claim fail with
/// an arithmetic underflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeRate(pub Amount);

impl FeeRate {
    /// No fee.
    pub const ZERO: Self = Self(U256::ZERO);

    #[must_use]
    pub fn from_numerator(numerator: Amount) -> Self {
        Self(numerator)
    }

    /// Build a fee rate from a human percentage, e.g. `12.5` for 12.5%.
    ///
    /// Digits beyond [`constants::FEE_DECIMALS`] are truncated.
    pub fn from_percent(percent: Decimal) -> Result<Self> {
        if percent.is_sign_negative() {
            return Err(AuctionError::Configuration(format!(
                "fee percent must not be negative, got {percent}"
            )));
        }
        let scale = Decimal::from(10u64.pow(constants::FEE_DECIMALS));
        let numerator = percent
            .checked_mul(scale)
            .and_then(|scaled| scaled.trunc().to_u128())
            .ok_or_else(|| {
                AuctionError::Configuration(format!("fee percent {percent} is out of range"))
            })?;
        Ok(Self(U256::from(numerator)))
    }

    /// The raw fixed-point numerator.
    #[must_use]
    pub fn numerator(&self) -> Amount {
        self.0
    }

    /// Whether the fee is larger than 100%.
    #[must_use]
    pub fn exceeds_full_percent(&self) -> bool {
        self.0 > constants::FULL_PERCENT
    }

    /// The fee as a human percentage, if it fits a `Decimal`.
    #[must_use]
    pub fn as_percent(&self) -> Option<Decimal> {
        let numerator = u128::try_from(self.0).ok()?;
        let numerator = i128::try_from(numerator).ok()?;
        Decimal::try_from_i128_with_scale(numerator, constants::FEE_DECIMALS)
            .ok()
            .map(|d| d.normalize())
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_percent() {
            Some(pct) => write!(f, "{pct}%"),
            None => write!(f, "{}/{}", self.0, constants::FULL_PERCENT),
        }
    }
}

// ---------------------------------------------------------------------------
// ReturnBreakdown
// ---------------------------------------------------------------------------

/// A cross-asset reward split into the part paid to the depositor and the
/// part retained by the owner. `net + fee == gross` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBreakdown {
    /// The caller's proportional share of the counterpart pool.
    pub gross: Amount,
    /// Owner's cut of `gross`.
    pub fee: Amount,
    /// What the caller receives.
    pub net: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn counterpart_swaps() {
        assert_eq!(Asset::Native.counterpart(), Asset::Token);
        assert_eq!(Asset::Token.counterpart(), Asset::Native);
        assert_eq!(Asset::both(), [Asset::Native, Asset::Token]);
    }

    #[test]
    fn asset_display() {
        assert_eq!(format!("{}", Asset::Native), "NATIVE");
        assert_eq!(format!("{}", Asset::Token), "TOKEN");
    }

    #[test]
    fn fee_from_whole_percent() {
        let fee = FeeRate::from_percent(Decimal::new(12, 0)).unwrap();
        assert_eq!(
            fee.numerator(),
            U256::from(12u64) * U256::from(10u64).pow(U256::from(18u64))
        );
        assert!(!fee.exceeds_full_percent());
    }

    #[test]
    fn fee_from_fractional_percent() {
        let fee = FeeRate::from_percent(Decimal::from_str("12.5").unwrap()).unwrap();
        assert_eq!(fee.numerator(), U256::from(12_500_000_000_000_000_000u128));
        assert_eq!(fee.as_percent(), Some(Decimal::from_str("12.5").unwrap()));
        assert_eq!(format!("{fee}"), "12.5%");
    }

    #[test]
    fn full_percent_is_hundred() {
        let fee = FeeRate::from_numerator(constants::FULL_PERCENT);
        assert_eq!(fee.as_percent(), Some(Decimal::new(100, 0)));
        assert!(!fee.exceeds_full_percent());
        let over = FeeRate::from_numerator(constants::FULL_PERCENT + U256::from(1u64));
        assert!(over.exceeds_full_percent());
    }

    #[test]
    fn negative_fee_rejected() {
        let err = FeeRate::from_percent(Decimal::new(-1, 0)).unwrap_err();
        assert!(matches!(err, AuctionError::Configuration(_)));
    }

    #[test]
    fn zero_fee_default() {
        assert_eq!(FeeRate::default(), FeeRate::ZERO);
        assert_eq!(FeeRate::ZERO.as_percent(), Some(Decimal::ZERO));
    }

    #[test]
    fn fee_rate_serializes_as_numerator() {
        let fee = FeeRate::from_numerator(U256::from(5u64));
        let json = serde_json::to_string(&fee).unwrap();
        let back: FeeRate = serde_json::from_str(&json).unwrap();
        assert_eq!(fee, back);
    }
}
