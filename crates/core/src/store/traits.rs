use async_trait::async_trait;

use crate::record::{Key, Record};

use super::{BatchPutOutput, Result, ReturnValues, ScanOutput};

/// Access to records in a remote table store.
///
/// Each call is one round trip and holds no state across calls. Retries,
/// pagination and credentials are the backend client's concern.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Lists at most `limit` table names.
    async fn list_tables(&self, limit: usize) -> Result<Vec<String>>;

    /// Reads one page of every record in `table`.
    async fn scan_all(&self, table: &str) -> Result<ScanOutput>;

    /// Gets the record matching `key`. A missing record is `Ok(None)`.
    async fn get_record(&self, table: &str, key: &Key) -> Result<Option<Record>>;

    /// Inserts or overwrites a record. Last write wins.
    ///
    /// Returns the replaced attributes when `return_values` asks for them.
    async fn put_record(
        &self,
        table: &str,
        record: &Record,
        return_values: ReturnValues,
    ) -> Result<Option<Record>>;

    /// Writes several records in one request.
    ///
    /// Records the service did not apply come back in
    /// [`BatchPutOutput::unprocessed`]; only total failure is an `Err`.
    async fn batch_put(&self, table: &str, records: &[Record]) -> Result<BatchPutOutput>;

    /// Deletes the record matching `key`. Deleting a missing record is not an error.
    async fn delete_record(
        &self,
        table: &str,
        key: &Key,
        return_values: ReturnValues,
    ) -> Result<Option<Record>>;
}
