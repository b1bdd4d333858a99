//! Error types for the ledger engine.

use crate::account::AccountId;
use thiserror::Error;

/// Result type alias for batch and CLI operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Classified failure of a single transfer.
///
/// Every variant is returned as a typed result to the immediate caller;
/// the engine never logs, retries, or swallows one internally. None of
/// these are retried by the engine itself; retry policy, if any, belongs
/// to the caller.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransferError {
    /// Source and destination are the same account; rejected before any
    /// storage access.
    #[error("cannot transfer between an account and itself")]
    SameAccount,

    /// Amount is zero or negative; rejected before any storage access.
    #[error("transfer amount must be positive, got {amount}")]
    InvalidAmount { amount: i64 },

    /// Either endpoint does not exist. The transaction is discarded with
    /// no writes.
    #[error("account {id} not found")]
    AccountNotFound { id: AccountId },

    /// The withdrawal would make the source balance negative. The
    /// transaction is discarded with no writes.
    #[error("insufficient funds: {available} available, {requested} requested")]
    InsufficientFunds { available: i64, requested: i64 },

    /// The destination balance would exceed the representable range. The
    /// transaction is discarded with no writes.
    #[error("destination balance would overflow")]
    Overflow,

    /// The store could not durably apply the already-validated writes.
    /// The ledger reflects the pre-call state; the caller may retry the
    /// whole operation from scratch.
    #[error("commit failed: {0}")]
    CommitFailed(#[from] CommitError),
}

/// Failure reported by a store when committing a transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitError {
    /// Another transaction modified an account this one read before it
    /// could commit. Reported by stores with optimistic concurrency;
    /// [`MemoryStore`](crate::store::MemoryStore) serializes transactions
    /// and never produces it.
    #[error("write conflict on account {id}")]
    Conflict { id: AccountId },

    /// The backing store failed to make the writes durable.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Failure creating an account.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// Accounts start at a non-negative balance.
    #[error("initial balance must be non-negative, got {balance}")]
    NegativeInitialBalance { balance: i64 },
}

/// Errors that can occur while running a batch of operations.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: ledger-engine <operations.csv>")]
    MissingArgument,
}
