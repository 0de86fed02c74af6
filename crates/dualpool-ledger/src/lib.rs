//! # dualpool-ledger
//!
//! **Ledger Plane**: everything the auction stores or consults before money
//! moves.
//!
//! ## Architecture
//!
//! 1. **TimeKeeper**: maps the clock onto a zero-based period index
//! 2. **PeriodLedger**: per-period pool totals and per-account positions
//! 3. **StopSwitch**: one-way halt flag gating deposits and refunds
//! 4. **OwnerRewardVault**: fees accrued in both assets
//! 5. **Collaborators**: [`Clock`], [`TokenLedger`] and [`NativeBank`] traits,
//!    with in-memory implementations in [`memory`]
//!
//! ## Deposit Flow
//!
//! ```text
//! Call → TimeKeeper.current_period() → PeriodLedger.check_deposit()
//!      → TokenLedger.transfer_from() (token only) → PeriodLedger.record_deposit()
//! ```

pub mod clock;
pub mod memory;
pub mod owner_vault;
pub mod period_ledger;
pub mod stop_switch;
pub mod time_keeper;
pub mod transfer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::{InMemoryNativeBank, InMemoryTokenLedger};
pub use owner_vault::OwnerRewardVault;
pub use period_ledger::PeriodLedger;
pub use stop_switch::StopSwitch;
pub use time_keeper::TimeKeeper;
pub use transfer::{NativeBank, TokenLedger};
