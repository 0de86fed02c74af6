//! System-wide constants for the Dualpool auction.

use alloy_primitives::{U256, uint};

/// Fixed-point denominator of the fee fraction: `100 × 10^18` represents 100%.
pub const FULL_PERCENT: U256 = uint!(100_000_000_000_000_000_000_U256);

/// Number of decimal places a fee numerator carries (one percent = 10^18).
pub const FEE_DECIMALS: u32 = 18;

/// Domain separator mixed into every receipt digest.
pub const RECEIPT_DOMAIN: &[u8] = b"dualpool:receipt:v1:";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Dualpool";
