//! DynamoDB record store.
//!
//! Implements `RecordStore` from `tablekit_core::store` on top of
//! `aws_sdk_dynamodb::Client`. Every method is one request.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{PutRequest, ReturnConsumedCapacity, ReturnValue, WriteRequest};
use aws_sdk_dynamodb::Client;

use tablekit_core::record::{Key, Record};
use tablekit_core::store::{
    list_tables_limit, validate_batch, BatchPutOutput, Operation, RecordStore, Result,
    ReturnValues, ScanOutput, StoreError,
};

use super::client::create_client;
use super::conversions::{item_to_record, key_to_item, optional_record, record_to_item};
use super::error::map_sdk_error;
use crate::config::Config;

/// DynamoDB-based record store.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a store over an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a store with a client built from `config`.
    pub async fn from_config(config: &Config) -> Self {
        Self::new(create_client(config).await)
    }
}

fn to_return_value(return_values: ReturnValues) -> ReturnValue {
    match return_values {
        ReturnValues::None => ReturnValue::None,
        ReturnValues::AllOld => ReturnValue::AllOld,
    }
}

fn count(value: i32) -> usize {
    usize::try_from(value).unwrap_or_default()
}

#[async_trait]
impl RecordStore for DynamoDbStore {
    async fn list_tables(&self, limit: usize) -> Result<Vec<String>> {
        let limit = list_tables_limit(limit)?;
        tracing::debug!(limit, "ListTables");

        let output = self
            .client
            .list_tables()
            .limit(i32::try_from(limit).unwrap_or(i32::MAX))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, Operation::ListTables))?;

        let mut names = output.table_names.unwrap_or_default();
        names.truncate(limit);
        Ok(names)
    }

    async fn scan_all(&self, table: &str) -> Result<ScanOutput> {
        tracing::debug!(table, "Scan");

        let output = self
            .client
            .scan()
            .table_name(table)
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, Operation::Scan))?;

        let items = output
            .items
            .unwrap_or_default()
            .iter()
            .map(item_to_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(ScanOutput {
            items,
            count: count(output.count),
            scanned_count: count(output.scanned_count),
            consumed_capacity: output
                .consumed_capacity
                .and_then(|capacity| capacity.capacity_units),
            truncated: output
                .last_evaluated_key
                .is_some_and(|key| !key.is_empty()),
        })
    }

    async fn get_record(&self, table: &str, key: &Key) -> Result<Option<Record>> {
        tracing::debug!(table, %key, "GetItem");

        let output = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(key_to_item(key)))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, Operation::GetItem))?;

        optional_record(output.item.as_ref())
    }

    async fn put_record(
        &self,
        table: &str,
        record: &Record,
        return_values: ReturnValues,
    ) -> Result<Option<Record>> {
        tracing::debug!(table, attributes = record.len(), "PutItem");

        let output = self
            .client
            .put_item()
            .table_name(table)
            .set_item(Some(record_to_item(record)))
            .return_values(to_return_value(return_values))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, Operation::PutItem))?;

        optional_record(output.attributes.as_ref())
    }

    async fn batch_put(&self, table: &str, records: &[Record]) -> Result<BatchPutOutput> {
        validate_batch(records)?;
        if records.is_empty() {
            return Ok(BatchPutOutput::default());
        }
        tracing::debug!(table, records = records.len(), "BatchWriteItem");

        let requests = records
            .iter()
            .map(|record| {
                let put = PutRequest::builder()
                    .set_item(Some(record_to_item(record)))
                    .build()
                    .map_err(|e| StoreError::Request(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        let output = self
            .client
            .batch_write_item()
            .request_items(table, requests)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, Operation::BatchWriteItem))?;

        let mut unprocessed_items = output.unprocessed_items.unwrap_or_default();
        let unprocessed = unprocessed_items
            .remove(table)
            .unwrap_or_default()
            .iter()
            .filter_map(|request| request.put_request())
            .map(|put| item_to_record(put.item()))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(table, unprocessed = unprocessed.len(), "BatchWriteItem done");

        Ok(BatchPutOutput { unprocessed })
    }

    async fn delete_record(
        &self,
        table: &str,
        key: &Key,
        return_values: ReturnValues,
    ) -> Result<Option<Record>> {
        tracing::debug!(table, %key, "DeleteItem");

        let output = self
            .client
            .delete_item()
            .table_name(table)
            .set_key(Some(key_to_item(key)))
            .return_values(to_return_value(return_values))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, Operation::DeleteItem))?;

        optional_record(output.attributes.as_ref())
    }
}
