//! In-memory record store.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tablekit_core::record::{AttributeValue, Key, Record};
use tablekit_core::store::{
    list_tables_limit, validate_batch, BatchPutOutput, Operation, RecordStore, Result,
    ReturnValues, ScanOutput, StoreError,
};

/// In-memory storage backend for testing and offline runs.
///
/// Tables are declared with their partition key attribute and hold records
/// ordered by key value. Failures can be injected per operation, and every
/// attempted operation is recorded so tests can see what ran and what did not.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

#[derive(Debug, Default)]
struct State {
    tables: BTreeMap<String, Table>,
    failures: HashMap<Operation, StoreError>,
    calls: Vec<Operation>,
    batch_capacity: Option<usize>,
}

#[derive(Debug)]
struct Table {
    key_attribute: String,
    items: BTreeMap<AttributeValue, Record>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a table keyed by `key_attribute`. Existing tables are left alone.
    pub async fn create_table(&self, name: impl Into<String>, key_attribute: impl Into<String>) {
        let mut state = self.state.write().await;
        state.tables.entry(name.into()).or_insert_with(|| Table {
            key_attribute: key_attribute.into(),
            items: BTreeMap::new(),
        });
    }

    /// Makes every later call to `operation` fail with `error`.
    pub async fn fail_on(&self, operation: Operation, error: StoreError) {
        self.state.write().await.failures.insert(operation, error);
    }

    /// Limits how many records a single batch put applies; the rest come back unprocessed.
    pub async fn set_batch_capacity(&self, capacity: usize) {
        self.state.write().await.batch_capacity = Some(capacity);
    }

    /// Operations attempted so far, in order, including ones that failed.
    pub async fn calls(&self) -> Vec<Operation> {
        self.state.read().await.calls.clone()
    }
}

impl State {
    /// Records the call and returns the injected failure for it, if any.
    fn enter(&mut self, operation: Operation) -> Result<()> {
        self.calls.push(operation);
        match self.failures.get(&operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn table(&self, name: &str) -> Result<&Table> {
        self.tables.get(name).ok_or_else(|| table_not_found(name))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables.get_mut(name).ok_or_else(|| table_not_found(name))
    }
}

impl Table {
    /// Resolves a key to the stored key value, checking it matches the schema.
    fn key_value(&self, key: &Key) -> Result<AttributeValue> {
        match key.single() {
            Some((name, value)) if *name == self.key_attribute => Ok(value.clone()),
            _ => Err(StoreError::Request(
                "The provided key element does not match the schema".to_string(),
            )),
        }
    }

    fn record_key_value(&self, record: &Record) -> Result<AttributeValue> {
        let key = record.key(&self.key_attribute).ok_or_else(|| {
            StoreError::Request(format!(
                "One of the required keys was not given a value: {}",
                self.key_attribute
            ))
        })?;
        self.key_value(&key)
    }
}

fn table_not_found(name: &str) -> StoreError {
    StoreError::Request(format!(
        "Requested resource not found: Table: {name} not found"
    ))
}

fn returned(previous: Option<Record>, return_values: ReturnValues) -> Option<Record> {
    match return_values {
        ReturnValues::AllOld => previous,
        ReturnValues::None => None,
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_tables(&self, limit: usize) -> Result<Vec<String>> {
        let mut state = self.state.write().await;
        state.enter(Operation::ListTables)?;
        let limit = list_tables_limit(limit)?;

        Ok(state
            .tables
            .keys()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn scan_all(&self, table: &str) -> Result<ScanOutput> {
        let mut state = self.state.write().await;
        state.enter(Operation::Scan)?;

        let items: Vec<Record> = state.table(table)?.items.values().cloned().collect();
        Ok(ScanOutput {
            count: items.len(),
            scanned_count: items.len(),
            items,
            consumed_capacity: None,
            truncated: false,
        })
    }

    async fn get_record(&self, table: &str, key: &Key) -> Result<Option<Record>> {
        let mut state = self.state.write().await;
        state.enter(Operation::GetItem)?;

        let table = state.table(table)?;
        let key_value = table.key_value(key)?;
        Ok(table.items.get(&key_value).cloned())
    }

    async fn put_record(
        &self,
        table: &str,
        record: &Record,
        return_values: ReturnValues,
    ) -> Result<Option<Record>> {
        let mut state = self.state.write().await;
        state.enter(Operation::PutItem)?;

        let table = state.table_mut(table)?;
        let key_value = table.record_key_value(record)?;
        let previous = table.items.insert(key_value, record.clone());
        Ok(returned(previous, return_values))
    }

    async fn batch_put(&self, table: &str, records: &[Record]) -> Result<BatchPutOutput> {
        let mut state = self.state.write().await;
        state.enter(Operation::BatchWriteItem)?;
        validate_batch(records)?;

        let capacity = state.batch_capacity.unwrap_or(records.len());
        let table = state.table_mut(table)?;

        // The whole request is rejected if any record lacks the key or repeats one.
        let mut keyed = Vec::with_capacity(records.len());
        let mut seen = BTreeSet::new();
        for record in records {
            let key_value = table.record_key_value(record)?;
            if !seen.insert(key_value.clone()) {
                return Err(StoreError::Request(
                    "Provided list of item keys contains duplicates".to_string(),
                ));
            }
            keyed.push((key_value, record));
        }

        let mut output = BatchPutOutput::default();
        for (index, (key_value, record)) in keyed.into_iter().enumerate() {
            if index < capacity {
                table.items.insert(key_value, record.clone());
            } else {
                output.unprocessed.push(record.clone());
            }
        }

        Ok(output)
    }

    async fn delete_record(
        &self,
        table: &str,
        key: &Key,
        return_values: ReturnValues,
    ) -> Result<Option<Record>> {
        let mut state = self.state.write().await;
        state.enter(Operation::DeleteItem)?;

        let table = state.table_mut(table)?;
        let key_value = table.key_value(key)?;
        let previous = table.items.remove(&key_value);
        Ok(returned(previous, return_values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablekit_core::store::MAX_LIST_TABLES_LIMIT;

    const TABLE: &str = "golang-example";

    async fn store_with_table() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.create_table(TABLE, "dummy").await;
        store
    }

    fn record(key: &str) -> Record {
        Record::new()
            .with_string("dummy", key)
            .with_string("timestamp", "2024-01-15T10:30:00+00:00")
    }

    // ==================== Get / Put Tests ====================

    #[tokio::test]
    async fn test_put_then_get_returns_equal_record() {
        let store = store_with_table().await;
        let record = record("hoge");

        store
            .put_record(TABLE, &record, ReturnValues::None)
            .await
            .unwrap();

        let retrieved = store
            .get_record(TABLE, &Key::string("dummy", "hoge"))
            .await
            .unwrap();
        assert_eq!(retrieved, Some(record));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = store_with_table().await;

        let retrieved = store
            .get_record(TABLE, &Key::string("dummy", "missing"))
            .await
            .unwrap();
        assert!(retrieved.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_last_write_wins() {
        let store = store_with_table().await;
        let first = record("hoge");
        let second = Record::new()
            .with_string("dummy", "hoge")
            .with_string("timestamp", "later");

        store
            .put_record(TABLE, &first, ReturnValues::None)
            .await
            .unwrap();
        let previous = store
            .put_record(TABLE, &second, ReturnValues::AllOld)
            .await
            .unwrap();

        assert_eq!(previous, Some(first));
        let retrieved = store
            .get_record(TABLE, &Key::string("dummy", "hoge"))
            .await
            .unwrap();
        assert_eq!(retrieved, Some(second));
    }

    #[tokio::test]
    async fn test_put_without_return_values_returns_nothing() {
        let store = store_with_table().await;

        store
            .put_record(TABLE, &record("hoge"), ReturnValues::None)
            .await
            .unwrap();
        let previous = store
            .put_record(TABLE, &record("hoge"), ReturnValues::None)
            .await
            .unwrap();

        assert!(previous.is_none());
    }

    #[tokio::test]
    async fn test_put_missing_key_attribute_is_request_error() {
        let store = store_with_table().await;
        let record = Record::new().with_string("timestamp", "now");

        let result = store.put_record(TABLE, &record, ReturnValues::None).await;
        assert!(matches!(result, Err(StoreError::Request(_))));
    }

    #[tokio::test]
    async fn test_unknown_table_is_request_error() {
        let store = InMemoryStore::new();

        let result = store.scan_all("nope").await;
        assert_eq!(
            result,
            Err(StoreError::Request(
                "Requested resource not found: Table: nope not found".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_get_with_wrong_key_attribute_is_request_error() {
        let store = store_with_table().await;

        let result = store.get_record(TABLE, &Key::string("other", "hoge")).await;
        assert!(matches!(result, Err(StoreError::Request(_))));
    }

    // ==================== Delete Tests ====================

    #[tokio::test]
    async fn test_delete_then_get_is_none() {
        let store = store_with_table().await;
        let key = Key::string("dummy", "fuga");

        store
            .put_record(TABLE, &record("fuga"), ReturnValues::None)
            .await
            .unwrap();
        let previous = store
            .delete_record(TABLE, &key, ReturnValues::AllOld)
            .await
            .unwrap();

        assert_eq!(previous, Some(record("fuga")));
        assert!(store.get_record(TABLE, &key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_an_error() {
        let store = store_with_table().await;

        let previous = store
            .delete_record(TABLE, &Key::string("dummy", "fuga"), ReturnValues::AllOld)
            .await
            .unwrap();
        assert!(previous.is_none());
    }

    // ==================== Scan / Batch Tests ====================

    #[tokio::test]
    async fn test_batch_put_visible_to_scan() {
        let store = store_with_table().await;
        let records: Vec<Record> = (0..10).map(|i| record(&format!("batch-{i}"))).collect();

        let output = store.batch_put(TABLE, &records).await.unwrap();
        assert!(output.is_complete());

        let scan = store.scan_all(TABLE).await.unwrap();
        assert_eq!(scan.count, 10);
        assert_eq!(scan.scanned_count, 10);
        for record in &records {
            assert!(scan.items.contains(record));
        }
    }

    #[tokio::test]
    async fn test_batch_put_over_capacity_reports_unprocessed() {
        let store = store_with_table().await;
        store.set_batch_capacity(2).await;
        let records: Vec<Record> = (0..5).map(|i| record(&format!("batch-{i}"))).collect();

        let output = store.batch_put(TABLE, &records).await.unwrap();

        assert_eq!(output.unprocessed, records[2..].to_vec());
        assert_eq!(store.scan_all(TABLE).await.unwrap().count, 2);
    }

    #[tokio::test]
    async fn test_batch_put_oversize_is_request_error() {
        let store = store_with_table().await;
        let records: Vec<Record> = (0..26).map(|i| record(&format!("batch-{i}"))).collect();

        let result = store.batch_put(TABLE, &records).await;
        assert!(matches!(result, Err(StoreError::Request(_))));
        assert_eq!(store.scan_all(TABLE).await.unwrap().count, 0);
    }

    #[tokio::test]
    async fn test_batch_put_empty_is_noop() {
        let store = store_with_table().await;

        let output = store.batch_put(TABLE, &[]).await.unwrap();
        assert!(output.is_complete());
    }

    #[tokio::test]
    async fn test_batch_put_duplicate_keys_rejects_whole_request() {
        let store = store_with_table().await;
        let records = vec![record("hoge"), record("fuga"), record("hoge")];

        let result = store.batch_put(TABLE, &records).await;

        assert_eq!(
            result,
            Err(StoreError::Request(
                "Provided list of item keys contains duplicates".to_string()
            ))
        );
        assert_eq!(store.scan_all(TABLE).await.unwrap().count, 0);
    }

    // ==================== ListTables Tests ====================

    #[tokio::test]
    async fn test_list_tables_respects_limit() {
        let store = InMemoryStore::new();
        for i in 0..8 {
            store.create_table(format!("table-{i}"), "dummy").await;
        }

        let tables = store.list_tables(5).await.unwrap();
        assert_eq!(tables.len(), 5);

        let all = store.list_tables(100).await.unwrap();
        assert_eq!(all.len(), 8);
    }

    #[tokio::test]
    async fn test_list_tables_zero_limit_is_request_error() {
        let store = InMemoryStore::new();
        store.create_table("a", "dummy").await;
        store.create_table("b", "dummy").await;

        let result = store.list_tables(0).await;
        assert!(matches!(result, Err(StoreError::Request(_))));
    }

    #[tokio::test]
    async fn test_list_tables_caps_limit_at_service_maximum() {
        let store = InMemoryStore::new();
        for i in 0..(MAX_LIST_TABLES_LIMIT + 5) {
            store.create_table(format!("table-{i:03}"), "dummy").await;
        }

        let tables = store.list_tables(1_000).await.unwrap();
        assert_eq!(tables.len(), MAX_LIST_TABLES_LIMIT);
    }

    // ==================== Failure Injection Tests ====================

    #[tokio::test]
    async fn test_injected_failure_is_returned_and_recorded() {
        let store = store_with_table().await;
        store
            .fail_on(
                Operation::Scan,
                StoreError::Connection("connection reset".to_string()),
            )
            .await;

        let result = store.scan_all(TABLE).await;
        assert_eq!(
            result,
            Err(StoreError::Connection("connection reset".to_string()))
        );
        assert_eq!(store.calls().await, vec![Operation::Scan]);
    }
}
