//! One-way halt switch.
//!
//! Once engaged the auction accepts no new deposits, and depositors in the
//! current and future periods may pull their principal back regardless of
//! the counterpart pool. Closed periods and reward claims are unaffected.
//! There is no way to disengage it.

use dualpool_types::{AuctionError, Result};
use serde::{Deserialize, Serialize};

/// Permanent halt flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopSwitch {
    stopped: bool,
}

impl StopSwitch {
    /// A switch in the running (not stopped) position.
    #[must_use]
    pub fn new() -> Self {
        Self { stopped: false }
    }

    /// Restore a switch from persisted state.
    #[must_use]
    pub fn from_state(stopped: bool) -> Self {
        Self { stopped }
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Guard a deposit attempt. Returns [`AuctionError::Halted`] once stopped.
    pub fn check_deposits_open(&self) -> Result<()> {
        if self.stopped {
            Err(AuctionError::Halted)
        } else {
            Ok(())
        }
    }

    /// Whether principal in a period that has not closed may be refunded
    /// without looking at the counterpart pool.
    #[must_use]
    pub fn refunds_open(&self) -> bool {
        self.stopped
    }

    /// Engage the switch.
    ///
    /// # Errors
    /// Returns [`AuctionError::AlreadyStopped`] if already engaged.
    pub fn engage(&mut self) -> Result<()> {
        if self.stopped {
            return Err(AuctionError::AlreadyStopped);
        }
        self.stopped = true;
        Ok(())
    }
}
