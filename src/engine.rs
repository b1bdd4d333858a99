//! Core balance-transfer engine.
//!
//! Executes one transfer (moving an integer amount between two accounts)
//! as an indivisible unit against an [`AccountStore`] transaction. Both
//! balance changes land together or not at all.

use crate::account::{Account, AccountId};
use crate::error::{StoreError, TransferError};
use crate::store::{AccountStore, StoreTransaction};

/// One requested balance movement.
///
/// A transient value object: it exists only for the duration of one engine
/// invocation and is never persisted. The transport boundary is expected to
/// have produced already-typed scalars; the engine enforces the semantic
/// preconditions (`source != dest`, `amount > 0`) itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    /// Account to debit.
    pub source: AccountId,

    /// Account to credit.
    pub dest: AccountId,

    /// Units to move. Must be strictly positive.
    pub amount: i64,
}

/// The transfer engine.
///
/// Stateless between calls and safe to invoke from any number of
/// concurrent callers: every invocation opens its own store transaction,
/// and isolation between overlapping transfers is the store's contract,
/// not the engine's. The store is an explicit construction parameter;
/// there is no ambient global handle.
///
/// # Failure behavior
///
/// On any failure, zero rows are mutated: validation errors return before
/// the writes, and every early exit drops the transaction, which discards
/// its buffered writes. The engine performs no logging and no retries; a
/// failed commit is surfaced as [`TransferError::CommitFailed`] and
/// retrying is the caller's decision.
pub struct TransferEngine<'a, S: AccountStore> {
    store: &'a S,
}

impl<'a, S: AccountStore> TransferEngine<'a, S> {
    /// Creates an engine backed by the given store.
    pub fn new(store: &'a S) -> Self {
        TransferEngine { store }
    }

    /// Moves `request.amount` units from the source account to the
    /// destination account, atomically.
    ///
    /// Validation order is fixed (identity, amount, source existence,
    /// destination existence, sufficiency, destination overflow), so every
    /// failure is deterministic given the same pre-state and inputs.
    ///
    /// Returns the post-transfer source account on success. Repeating an
    /// identical request moves the funds again; the engine provides no
    /// deduplication.
    pub fn transfer(&self, request: TransferRequest) -> Result<Account, TransferError> {
        let TransferRequest {
            source,
            dest,
            amount,
        } = request;

        if source == dest {
            return Err(TransferError::SameAccount);
        }
        if amount <= 0 {
            return Err(TransferError::InvalidAmount { amount });
        }

        // Reads and writes share one transaction, so a concurrent transfer
        // cannot slip a committed write between this read and this write.
        // Early returns drop `txn`, discarding anything staged.
        let mut txn = self.store.begin();

        let mut from = txn
            .get_account(source)
            .ok_or(TransferError::AccountNotFound { id: source })?;
        let mut to = txn
            .get_account(dest)
            .ok_or(TransferError::AccountNotFound { id: dest })?;

        if amount > from.balance {
            return Err(TransferError::InsufficientFunds {
                available: from.balance,
                requested: amount,
            });
        }

        // Non-negative by the check above.
        from.balance -= amount;
        to.balance = to
            .balance
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;

        txn.put_account(from.clone());
        txn.put_account(to);
        txn.commit()?;

        Ok(from)
    }

    /// Creates an account with a store-assigned id.
    pub fn create_account(
        &self,
        name: Option<&str>,
        initial_balance: i64,
    ) -> Result<Account, StoreError> {
        self.store.create_account(name, initial_balance)
    }

    /// Returns all accounts known to the store.
    pub fn list_accounts(&self) -> Vec<Account> {
        self.store.list_accounts()
    }
}
