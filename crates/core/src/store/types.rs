use std::fmt;

use serde::Serialize;

use crate::record::Record;

use super::{Result, StoreError};

/// Maximum number of put requests the service accepts in one batch write.
pub const MAX_BATCH_WRITE_ITEMS: usize = 25;

/// Largest page size the service accepts for ListTables.
pub const MAX_LIST_TABLES_LIMIT: usize = 100;

/// The operations a record store exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
    ListTables,
    Scan,
    GetItem,
    PutItem,
    BatchWriteItem,
    DeleteItem,
}

impl Operation {
    /// All operations, in the order the demo runs them.
    pub const ALL: [Operation; 6] = [
        Operation::ListTables,
        Operation::Scan,
        Operation::GetItem,
        Operation::PutItem,
        Operation::BatchWriteItem,
        Operation::DeleteItem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ListTables => "ListTables",
            Operation::Scan => "Scan",
            Operation::GetItem => "GetItem",
            Operation::PutItem => "PutItem",
            Operation::BatchWriteItem => "BatchWriteItem",
            Operation::DeleteItem => "DeleteItem",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a mutation should hand back the attributes it replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReturnValues {
    #[default]
    None,
    AllOld,
}

/// Result of a single-page scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanOutput {
    pub items: Vec<Record>,
    /// Number of items returned.
    pub count: usize,
    /// Number of items evaluated before any filter.
    pub scanned_count: usize,
    /// Capacity units consumed, when the backend reports them.
    pub consumed_capacity: Option<f64>,
    /// True when the service stopped before the end of the table.
    ///
    /// Further pages are never fetched.
    pub truncated: bool,
}

/// Result of a batch put.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchPutOutput {
    /// Records the service did not apply.
    pub unprocessed: Vec<Record>,
}

impl BatchPutOutput {
    /// True when every record in the batch was applied.
    pub fn is_complete(&self) -> bool {
        self.unprocessed.is_empty()
    }
}

/// Checks a requested ListTables limit and caps it at the service maximum.
///
/// A zero limit is rejected, as the service does.
pub fn list_tables_limit(limit: usize) -> Result<usize> {
    if limit == 0 {
        return Err(StoreError::Request(
            "ListTables limit must be at least 1".to_string(),
        ));
    }
    Ok(limit.min(MAX_LIST_TABLES_LIMIT))
}

/// Checks that a batch fits in a single batch write request.
pub fn validate_batch(records: &[Record]) -> Result<()> {
    if records.len() > MAX_BATCH_WRITE_ITEMS {
        return Err(StoreError::Request(format!(
            "batch of {} records exceeds the limit of {} per request",
            records.len(),
            MAX_BATCH_WRITE_ITEMS
        )));
    }
    Ok(())
}
