//! # Ledger Engine
//!
//! A small account ledger with an atomic balance-transfer core. Accounts
//! can be created, listed, and funds moved between two accounts; the two
//! balance changes of a transfer are applied together or not at all.
//!
//! ## Design Principles
//!
//! - **Atomicity**: every transfer runs inside one store transaction;
//!   failures leave both accounts untouched
//! - **Typed failures**: each rejection reason is a distinct
//!   [`TransferError`] variant, never a logged-and-swallowed string
//! - **Explicit dependencies**: the engine takes its [`AccountStore`] as a
//!   construction parameter; no globals
//! - **Store-owned isolation**: concurrent transfers over overlapping
//!   accounts are serialized by the store, not by engine-side locking
//!
//! ## Example
//!
//! ```
//! use ledger_engine::{MemoryStore, TransferEngine, TransferRequest};
//!
//! let store = MemoryStore::new();
//! let engine = TransferEngine::new(&store);
//!
//! let alice = engine.create_account(Some("alice"), 100).unwrap();
//! let bob = engine.create_account(Some("bob"), 0).unwrap();
//!
//! let updated = engine
//!     .transfer(TransferRequest {
//!         source: alice.id,
//!         dest: bob.id,
//!         amount: 40,
//!     })
//!     .unwrap();
//! assert_eq!(updated.balance, 60);
//! ```

pub mod account;
pub mod batch;
pub mod engine;
pub mod error;
pub mod operation;
pub mod store;

pub use account::{Account, AccountId};
pub use batch::BatchProcessor;
pub use engine::{TransferEngine, TransferRequest};
pub use error::{CommitError, LedgerError, Result, StoreError, TransferError};
pub use operation::{Operation, OperationRecord};
pub use store::{AccountStore, MemoryStore, MemoryTransaction, StoreTransaction};
