//! # dualpool-settlement
//!
//! **Settlement Plane**: cross-asset reward claims, principal refunds,
//! owner operations, conservation audit and the [`Auction`] facade.
//!
//! ## Architecture
//!
//! [`Auction`] receives calls from participants and the owner and:
//! 1. Resolves the current period from its clock
//! 2. Validates the request against the ledger without writing
//! 3. Moves value through the token ledger or native bank
//! 4. Commits the ledger change and seals a receipt
//!
//! ## Claim Flow
//!
//! ```text
//! Call → ClaimEngine.prepare() → NativeBank.pay() / TokenLedger.transfer()
//!      → ClaimEngine.commit() → OwnerRewardVault.accrue() → Receipt
//! ```
//!
//! [`SharedAuction`] serializes all of the above behind one lock for
//! concurrent callers.

pub mod auction;
pub mod claim;
pub mod conservation;
pub mod shared;
pub mod snapshot;
pub mod withdrawal;

pub use auction::Auction;
pub use claim::{ClaimEngine, ClaimPlan};
pub use conservation::{ConservationAudit, DustReport};
pub use shared::SharedAuction;
pub use snapshot::LedgerSnapshot;
pub use withdrawal::{PrincipalWithdrawalEngine, WithdrawalPlan};
