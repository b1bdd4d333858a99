//! Account record and identifier types.
//!
//! Maintains the invariant: `balance >= 0` at the end of every committed
//! transaction that touches the account.

use serde::Serialize;

/// Stable account identifier, assigned by the store on creation and never
/// reused.
pub type AccountId = u64;

/// A single ledger account.
///
/// # Invariants
///
/// - `balance >= 0` holds after every committed transaction. A balance may
///   only be computed negative transiently, inside an uncommitted
///   transaction that will be discarded.
///
/// # Mutation
///
/// Accounts are created once with an initial balance and from then on are
/// mutated only through the transfer engine, inside a store transaction.
/// The engine never caches account state across calls; it borrows rows for
/// the lifetime of one transaction via the store's isolation contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    /// Unique account identifier.
    pub id: AccountId,

    /// Optional display name.
    pub name: Option<String>,

    /// Current balance in unit-less integer units.
    pub balance: i64,
}

impl Account {
    /// Creates an account record with the given id, name, and balance.
    pub fn new(id: AccountId, name: Option<String>, balance: i64) -> Self {
        Account { id, name, balance }
    }
}
