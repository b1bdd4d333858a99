//! Account storage contract and the in-memory reference store.
//!
//! The transfer engine talks to storage exclusively through the
//! [`AccountStore`] and [`StoreTransaction`] traits, so the relational
//! engine a deployment would use stays swappable. [`MemoryStore`] is the
//! reference implementation used by the batch front-end and the tests.

use crate::account::{Account, AccountId};
use crate::error::{CommitError, StoreError};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Durable keyed storage of account records.
///
/// Implementations must guarantee that two concurrent transactions
/// touching a common account are serialized with respect to that
/// account's balance: if both read and then write account X, one must
/// either observe the other's committed write or fail its commit with
/// [`CommitError::Conflict`]. No lost updates.
pub trait AccountStore {
    /// Transaction handle tied to this store.
    type Txn<'a>: StoreTransaction
    where
        Self: 'a;

    /// Opens a transaction. May block on contention with other
    /// transactions, depending on the implementation's isolation strategy.
    fn begin(&self) -> Self::Txn<'_>;

    /// Creates an account with a store-assigned id and the given initial
    /// balance. Ids are never reused.
    fn create_account(
        &self,
        name: Option<&str>,
        initial_balance: i64,
    ) -> std::result::Result<Account, StoreError>;

    /// Returns all accounts. Order is implementation-defined;
    /// [`MemoryStore`] returns them ordered by id.
    fn list_accounts(&self) -> Vec<Account>;
}

/// One transaction against an [`AccountStore`].
///
/// Writes are buffered until [`commit`](StoreTransaction::commit); reads
/// observe the latest committed state plus this transaction's own
/// buffered writes, and nothing is visible to other transactions before
/// commit. Dropping an uncommitted transaction discards its writes, so
/// every exit path, including error paths, leaves the store untouched
/// unless commit succeeded.
pub trait StoreTransaction {
    /// Point read by id, seeing this transaction's own uncommitted writes.
    fn get_account(&self, id: AccountId) -> Option<Account>;

    /// Buffers a write, durable only upon commit.
    fn put_account(&mut self, account: Account);

    /// Applies all buffered writes, all-or-nothing. On failure the store
    /// reflects the pre-transaction state and the writes are discarded.
    fn commit(self) -> std::result::Result<(), CommitError>;

    /// Discards all buffered writes. Equivalent to dropping the
    /// transaction.
    fn rollback(self);
}

#[derive(Debug)]
struct Ledger {
    accounts: BTreeMap<AccountId, Account>,
    next_id: AccountId,
}

/// In-memory account store.
///
/// Grants exactly one open transaction at a time: [`begin`](Self::begin)
/// holds the store lock until the transaction commits or is dropped, so
/// overlapping transfers are fully serialized and commits never conflict.
///
/// # Example
///
/// ```
/// use ledger_engine::store::{AccountStore, MemoryStore, StoreTransaction};
///
/// let store = MemoryStore::new();
/// let account = store.create_account(Some("alice"), 100).unwrap();
///
/// let mut txn = store.begin();
/// let mut row = txn.get_account(account.id).unwrap();
/// row.balance -= 30;
/// txn.put_account(row);
/// txn.commit().unwrap();
///
/// assert_eq!(store.list_accounts()[0].balance, 70);
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Ledger>,
}

impl MemoryStore {
    /// Creates an empty store. The first created account gets id 1.
    pub fn new() -> Self {
        MemoryStore {
            inner: Mutex::new(Ledger {
                accounts: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        // Writes are staged away from the ledger until commit, so a
        // panicked transaction cannot have left partial state behind.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for MemoryStore {
    type Txn<'a> = MemoryTransaction<'a>;

    fn begin(&self) -> MemoryTransaction<'_> {
        MemoryTransaction {
            ledger: self.lock(),
            staged: BTreeMap::new(),
        }
    }

    fn create_account(
        &self,
        name: Option<&str>,
        initial_balance: i64,
    ) -> std::result::Result<Account, StoreError> {
        if initial_balance < 0 {
            return Err(StoreError::NegativeInitialBalance {
                balance: initial_balance,
            });
        }

        let mut ledger = self.lock();
        let id = ledger.next_id;
        ledger.next_id += 1;

        let account = Account::new(id, name.map(str::to_string), initial_balance);
        ledger.accounts.insert(id, account.clone());
        Ok(account)
    }

    fn list_accounts(&self) -> Vec<Account> {
        self.lock().accounts.values().cloned().collect()
    }
}

/// Transaction handle for [`MemoryStore`].
///
/// Holds the store lock for its whole lifetime. Buffered writes land in
/// the ledger only inside [`commit`](StoreTransaction::commit).
#[derive(Debug)]
pub struct MemoryTransaction<'a> {
    ledger: MutexGuard<'a, Ledger>,
    staged: BTreeMap<AccountId, Account>,
}

impl StoreTransaction for MemoryTransaction<'_> {
    fn get_account(&self, id: AccountId) -> Option<Account> {
        self.staged
            .get(&id)
            .or_else(|| self.ledger.accounts.get(&id))
            .cloned()
    }

    fn put_account(&mut self, account: Account) {
        self.staged.insert(account.id, account);
    }

    fn commit(mut self) -> std::result::Result<(), CommitError> {
        // Exclusive lock held since begin: nothing can have raced these
        // writes, so applying them cannot conflict.
        for (id, account) in std::mem::take(&mut self.staged) {
            self.ledger.accounts.insert(id, account);
        }
        Ok(())
    }

    fn rollback(self) {
        // Dropping discards the staged writes.
    }
}
