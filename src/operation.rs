//! Operation models for CSV parsing and internal representation.

use crate::account::AccountId;
use crate::engine::TransferRequest;
use serde::Deserialize;

/// Raw operation record as read from CSV.
///
/// Columns are `op,source,dest,amount,name`. Fields that do not apply to a
/// given operation are left empty: `create` rows use `amount` as the
/// initial balance and `name` as the display name, `transfer` rows use
/// `source`, `dest`, and `amount`. The amount is string-typed here so that
/// presence and numeric validity are checked in one place, in
/// [`parse`](OperationRecord::parse).
#[derive(Debug, Deserialize)]
pub struct OperationRecord {
    /// Operation type: create, transfer
    pub op: String,

    /// Source account id (transfer only)
    pub source: Option<AccountId>,

    /// Destination account id (transfer only)
    pub dest: Option<AccountId>,

    /// Integer amount: units to move, or the initial balance for create
    pub amount: Option<String>,

    /// Display name for the created account (create only)
    pub name: Option<String>,
}

impl OperationRecord {
    /// Parses the raw CSV record into a typed operation.
    ///
    /// Returns `None` if the record is invalid (unknown op, missing or
    /// non-integer amount, missing endpoint ids). Semantic validation
    /// such as positivity, existence, and sufficiency stays with the
    /// engine and the store; this boundary only guarantees typed, present
    /// scalars.
    pub fn parse(&self) -> Option<Operation> {
        let op = self.op.trim().to_lowercase();

        match op.as_str() {
            "create" => {
                let initial_balance = self.parse_amount()?;
                let name = self
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(str::to_string);
                Some(Operation::Create {
                    name,
                    initial_balance,
                })
            }
            "transfer" => {
                let amount = self.parse_amount()?;
                Some(Operation::Transfer(TransferRequest {
                    source: self.source?,
                    dest: self.dest?,
                    amount,
                }))
            }
            _ => None,
        }
    }

    /// Parses the amount field into an `i64`.
    fn parse_amount(&self) -> Option<i64> {
        let amount_str = self.amount.as_ref()?;
        let trimmed = amount_str.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse().ok()
    }
}

/// A parsed and typed operation ready for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create an account with an optional name and an initial balance.
    Create {
        name: Option<String>,
        initial_balance: i64,
    },

    /// Move funds between two existing accounts.
    Transfer(TransferRequest),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create() {
        let record = OperationRecord {
            op: "create".to_string(),
            source: None,
            dest: None,
            amount: Some("250".to_string()),
            name: Some("alice".to_string()),
        };

        let parsed = record.parse().unwrap();
        assert_eq!(
            parsed,
            Operation::Create {
                name: Some("alice".to_string()),
                initial_balance: 250,
            }
        );
    }

    #[test]
    fn test_parse_create_without_name() {
        let record = OperationRecord {
            op: "create".to_string(),
            source: None,
            dest: None,
            amount: Some("0".to_string()),
            name: Some("  ".to_string()),
        };

        match record.parse().unwrap() {
            Operation::Create { name, .. } => assert!(name.is_none()),
            other => panic!("Expected Create, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_transfer() {
        let record = OperationRecord {
            op: "transfer".to_string(),
            source: Some(1),
            dest: Some(2),
            amount: Some("40".to_string()),
            name: None,
        };

        let parsed = record.parse().unwrap();
        assert_eq!(
            parsed,
            Operation::Transfer(TransferRequest {
                source: 1,
                dest: 2,
                amount: 40,
            })
        );
    }

    #[test]
    fn test_parse_handles_whitespace() {
        let record = OperationRecord {
            op: "  Transfer  ".to_string(),
            source: Some(1),
            dest: Some(2),
            amount: Some("  10  ".to_string()),
            name: None,
        };

        assert!(matches!(
            record.parse().unwrap(),
            Operation::Transfer(TransferRequest { amount: 10, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_op() {
        let record = OperationRecord {
            op: "delete".to_string(),
            source: Some(1),
            dest: None,
            amount: None,
            name: None,
        };

        assert!(record.parse().is_none());
    }

    #[test]
    fn test_parse_rejects_missing_amount() {
        let record = OperationRecord {
            op: "transfer".to_string(),
            source: Some(1),
            dest: Some(2),
            amount: None,
            name: None,
        };

        assert!(record.parse().is_none());
    }

    #[test]
    fn test_parse_rejects_fractional_amount() {
        let record = OperationRecord {
            op: "transfer".to_string(),
            source: Some(1),
            dest: Some(2),
            amount: Some("1.5".to_string()),
            name: None,
        };

        assert!(record.parse().is_none());
    }

    #[test]
    fn test_parse_rejects_missing_endpoints() {
        let record = OperationRecord {
            op: "transfer".to_string(),
            source: None,
            dest: Some(2),
            amount: Some("10".to_string()),
            name: None,
        };

        assert!(record.parse().is_none());
    }

    #[test]
    fn test_parse_negative_amount_is_typed_not_validated() {
        // Positivity is the engine's precondition, not the parser's.
        let record = OperationRecord {
            op: "transfer".to_string(),
            source: Some(1),
            dest: Some(2),
            amount: Some("-10".to_string()),
            name: None,
        };

        assert!(matches!(
            record.parse().unwrap(),
            Operation::Transfer(TransferRequest { amount: -10, .. })
        ));
    }
}
