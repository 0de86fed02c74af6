//! # dualpool-types
//!
//! Shared types, errors, and configuration for the **Dualpool** periodic
//! dual-asset auction.
//!
//! This crate is the leaf dependency of the workspace: every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`PeriodId`]
//! - **Amounts**: [`Amount`], [`Asset`], [`FeeRate`], [`ReturnBreakdown`]
//! - **Caller model**: [`Call`]
//! - **Period model**: [`Period`], [`Position`], [`AssetPool`]
//! - **Receipt model**: [`Receipt`], [`ReceiptKind`]
//! - **Configuration**: [`AuctionConfig`]
//! - **Errors**: [`AuctionError`] with `DP_ERR_` prefix codes
//! - **Constants**: [`constants::FULL_PERCENT`] and friends

pub mod amount;
pub mod call;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod period;
pub mod receipt;

// Re-export all primary types at crate root for ergonomic imports:
//   use dualpool_types::{AccountId, PeriodId, Amount, Asset, ...};

pub use amount::*;
pub use call::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use period::*;
pub use receipt::*;

// Constants are accessed via `dualpool_types::constants::FOO`
// (not re-exported to avoid name collisions).
