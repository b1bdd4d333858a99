//! Batch front-end: applies a CSV of ledger operations against a store.
//!
//! Stands where a query-resolution layer would: it turns raw records into
//! typed operations, invokes the engine once per record, and reports the
//! final ledger. Records are applied in file order; a row that fails to
//! parse or to apply is logged at warn level and skipped, leaving the
//! ledger exactly as the previous row left it.

use crate::account::Account;
use crate::engine::TransferEngine;
use crate::error::Result;
use crate::operation::{Operation, OperationRecord};
use crate::store::AccountStore;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::{Read, Write};

/// Streams operation records from CSV into a transfer engine.
///
/// # Output Ordering
///
/// Final account states are output sorted by account id in ascending order
/// to ensure deterministic, reproducible output.
pub struct BatchProcessor<'a, S: AccountStore> {
    engine: TransferEngine<'a, S>,
}

impl<'a, S: AccountStore> BatchProcessor<'a, S> {
    /// Creates a processor applying operations against the given store.
    pub fn new(store: &'a S) -> Self {
        BatchProcessor {
            engine: TransferEngine::new(store),
        }
    }

    /// Processes operations from a CSV reader in streaming fashion.
    ///
    /// Records are read one at a time to minimize memory usage.
    /// Invalid records are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<OperationRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => {
                    if let Some(op) = record.parse() {
                        self.apply(op, row_num);
                    } else {
                        warn!("Row {}: Failed to parse operation record", row_num);
                    }
                }
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Applies a single typed operation.
    fn apply(&mut self, op: Operation, row: usize) {
        match op {
            Operation::Create {
                name,
                initial_balance,
            } => match self.engine.create_account(name.as_deref(), initial_balance) {
                Ok(account) => {
                    debug!(
                        "Row {}: Created account {} with balance {}",
                        row, account.id, account.balance
                    );
                }
                Err(e) => warn!("Row {}: {}", row, e),
            },
            Operation::Transfer(request) => match self.engine.transfer(request) {
                Ok(updated) => {
                    debug!(
                        "Row {}: Transferred {} from account {} to account {}, source balance now {}",
                        row, request.amount, request.source, request.dest, updated.balance
                    );
                }
                Err(e) => warn!("Row {}: {}", row, e),
            },
        }
    }

    /// Writes final account states to CSV.
    ///
    /// Output is sorted by account id in ascending order for deterministic
    /// results.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut accounts: Vec<Account> = self.engine.list_accounts();
        accounts.sort_by_key(|a| a.id);

        for account in accounts {
            csv_writer.serialize(account)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::io::Cursor;

    fn run_csv(csv: &str) -> (Vec<Account>, String) {
        let store = MemoryStore::new();
        let mut processor = BatchProcessor::new(&store);
        processor.process_csv(Cursor::new(csv)).unwrap();

        let mut output = Vec::new();
        processor.write_output(&mut output).unwrap();
        (store.list_accounts(), String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_create_and_transfer() {
        let csv = r#"op,source,dest,amount,name
create,,,100,alice
create,,,0,bob
transfer,1,2,40,"#;

        let (accounts, _) = run_csv(csv);
        assert_eq!(accounts[0].balance, 60);
        assert_eq!(accounts[1].balance, 40);
    }

    #[test]
    fn test_failed_transfer_is_skipped() {
        let csv = r#"op,source,dest,amount,name
create,,,50,alice
create,,,0,bob
transfer,1,2,51,
transfer,1,2,20,"#;

        let (accounts, _) = run_csv(csv);
        assert_eq!(accounts[0].balance, 30);
        assert_eq!(accounts[1].balance, 20);
    }

    #[test]
    fn test_unknown_op_is_skipped() {
        let csv = r#"op,source,dest,amount,name
create,,,10,alice
freeze,1,,5,"#;

        let (accounts, _) = run_csv(csv);
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].balance, 10);
    }

    #[test]
    fn test_negative_initial_balance_is_skipped() {
        let csv = r#"op,source,dest,amount,name
create,,,-5,alice
create,,,10,bob"#;

        let (accounts, _) = run_csv(csv);
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name.as_deref(), Some("bob"));
    }

    #[test]
    fn test_whitespace_handling() {
        let csv = r#"op, source, dest, amount, name
create, , , 100, alice
create, , , 0, bob
transfer, 1, 2, 25,"#;

        let (accounts, _) = run_csv(csv);
        assert_eq!(accounts[0].balance, 75);
        assert_eq!(accounts[1].balance, 25);
    }

    #[test]
    fn test_output_format() {
        let csv = r#"op,source,dest,amount,name
create,,,100,alice
create,,,0,"#;

        let (_, output) = run_csv(csv);
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("id,name,balance"));
        assert_eq!(lines.next(), Some("1,alice,100"));
        assert_eq!(lines.next(), Some("2,,0"));
    }

    #[test]
    fn test_empty_input_produces_header_only() {
        let (accounts, output) = run_csv("op,source,dest,amount,name\n");
        assert!(accounts.is_empty());
        assert_eq!(output.trim(), "");
    }
}
