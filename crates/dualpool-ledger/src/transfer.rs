//! External value-transfer collaborators.
//!
//! The auction never holds balances itself. It asks a [`TokenLedger`] to
//! move tokens and a [`NativeBank`] to pay out native currency, and treats a
//! successful return as proof the balance change happened. Any error aborts
//! the enclosing operation before the ledger is touched.

use dualpool_types::{AccountId, Amount, Result};

/// A fungible-token ledger acting on behalf of the auction account.
pub trait TokenLedger: Send {
    /// Pull `amount` from `from` into `to` using the auction's allowance.
    fn transfer_from(&mut self, from: AccountId, to: AccountId, amount: Amount) -> Result<()>;

    /// Send `amount` of the auction's own tokens to `to`.
    fn transfer(&mut self, to: AccountId, amount: Amount) -> Result<()>;

    fn balance_of(&self, account: &AccountId) -> Amount;
}

/// Native-currency payouts from the auction account.
pub trait NativeBank: Send {
    /// Pay `amount` of native currency to `to`. May fail if the recipient
    /// rejects the payment.
    fn pay(&mut self, to: AccountId, amount: Amount) -> Result<()>;

    fn balance_of(&self, account: &AccountId) -> Amount;
}
