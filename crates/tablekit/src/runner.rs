//! Demo and single-operation runners.
//!
//! Every step is awaited before the next one starts and the first failure
//! ends the run. The clock is passed in so record contents are reproducible.

use chrono::{DateTime, Utc};
use thiserror::Error;

use tablekit_core::record::{parse_record, parse_record_list, Key, Record};
use tablekit_core::store::{BatchPutOutput, Operation, RecordStore, ScanOutput, StoreError};

use crate::cli::Commands;
use crate::config::Config;
use crate::output::Printer;

/// A step that failed, with the store error it failed on.
#[derive(Debug, Error, PartialEq)]
#[error("{step} failed: {source}")]
pub struct RunError {
    pub step: Operation,
    #[source]
    pub source: StoreError,
}

impl RunError {
    fn at(step: Operation) -> impl FnOnce(StoreError) -> RunError {
        move |source| RunError { step, source }
    }
}

/// Everything a completed demo run observed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub tables: Vec<String>,
    pub scan: ScanOutput,
    pub fetched: Option<Record>,
    pub written: Record,
    pub replaced: Option<Record>,
    pub batch: BatchPutOutput,
    pub deleted: Option<Record>,
}

/// Builds a demo record keyed `<prefix>-<unix seconds>` and stamped with `now`.
pub fn demo_record(config: &Config, prefix: &str, now: DateTime<Utc>) -> Record {
    Record::new()
        .with_string(
            &config.key_attribute,
            format!("{}-{}", prefix, now.timestamp()),
        )
        .with_string(&config.timestamp_attribute, now.to_rfc3339())
}

/// Runs list, scan, get, put, batch put and delete in that order.
pub async fn run_demo(
    store: &dyn RecordStore,
    config: &Config,
    printer: Printer,
    now: DateTime<Utc>,
) -> Result<RunReport, RunError> {
    let table = config.table_name.as_str();
    let return_values = config.return_values();

    printer.banner(Operation::ListTables);
    let tables = store
        .list_tables(config.list_limit)
        .await
        .map_err(RunError::at(Operation::ListTables))?;
    printer.tables(&tables);

    printer.banner(Operation::Scan);
    let scan = store
        .scan_all(table)
        .await
        .map_err(RunError::at(Operation::Scan))?;
    printer.scan(&scan);

    printer.banner(Operation::GetItem);
    let key = Key::string(&config.key_attribute, &config.get_key);
    let fetched = store
        .get_record(table, &key)
        .await
        .map_err(RunError::at(Operation::GetItem))?;
    printer.fetched(&key, fetched.as_ref());

    printer.banner(Operation::PutItem);
    let written = demo_record(config, "dummy", now);
    let replaced = store
        .put_record(table, &written, return_values)
        .await
        .map_err(RunError::at(Operation::PutItem))?;
    printer.returned(replaced.as_ref());

    printer.banner(Operation::BatchWriteItem);
    let batch_records = vec![demo_record(config, "dummy-batch", now)];
    let batch = store
        .batch_put(table, &batch_records)
        .await
        .map_err(RunError::at(Operation::BatchWriteItem))?;
    if !batch.is_complete() {
        tracing::warn!(
            unprocessed = batch.unprocessed.len(),
            "Batch write left records unprocessed"
        );
    }
    printer.batch(&batch);

    printer.banner(Operation::DeleteItem);
    let key = Key::string(&config.key_attribute, &config.delete_key);
    let deleted = store
        .delete_record(table, &key, return_values)
        .await
        .map_err(RunError::at(Operation::DeleteItem))?;
    printer.returned(deleted.as_ref());

    Ok(RunReport {
        tables,
        scan,
        fetched,
        written,
        replaced,
        batch,
        deleted,
    })
}

/// What a single command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Demo(Box<RunReport>),
    Tables(Vec<String>),
    Scan(ScanOutput),
    /// The record a get found, if any.
    Fetched(Option<Record>),
    /// The attributes a put or delete replaced, when asked for.
    Returned(Option<Record>),
    Batch(BatchPutOutput),
}

/// Runs a single command against `store`.
pub async fn run_command(
    store: &dyn RecordStore,
    config: &Config,
    printer: Printer,
    command: &Commands,
    now: DateTime<Utc>,
) -> Result<CommandOutput, RunError> {
    let table = config.table_name.as_str();

    let output = match command {
        Commands::Demo => {
            CommandOutput::Demo(Box::new(run_demo(store, config, printer, now).await?))
        }
        Commands::Tables { limit } => {
            let tables = store
                .list_tables(limit.unwrap_or(config.list_limit))
                .await
                .map_err(RunError::at(Operation::ListTables))?;
            printer.tables(&tables);
            CommandOutput::Tables(tables)
        }
        Commands::Scan => {
            let scan = store
                .scan_all(table)
                .await
                .map_err(RunError::at(Operation::Scan))?;
            printer.scan(&scan);
            CommandOutput::Scan(scan)
        }
        Commands::Get { value } => {
            let key = Key::string(&config.key_attribute, value);
            let record = store
                .get_record(table, &key)
                .await
                .map_err(RunError::at(Operation::GetItem))?;
            printer.fetched(&key, record.as_ref());
            CommandOutput::Fetched(record)
        }
        Commands::Put { assignments } => {
            let record = parse_record(assignments).map_err(RunError::at(Operation::PutItem))?;
            let replaced = store
                .put_record(table, &record, config.return_values())
                .await
                .map_err(RunError::at(Operation::PutItem))?;
            printer.returned(replaced.as_ref());
            CommandOutput::Returned(replaced)
        }
        Commands::BatchPut { items } => {
            let mut records = Vec::with_capacity(items.len());
            for item in items {
                records
                    .push(parse_record_list(item).map_err(RunError::at(Operation::BatchWriteItem))?);
            }
            let batch = store
                .batch_put(table, &records)
                .await
                .map_err(RunError::at(Operation::BatchWriteItem))?;
            if !batch.is_complete() {
                tracing::warn!(
                    unprocessed = batch.unprocessed.len(),
                    "Batch write left records unprocessed"
                );
            }
            printer.batch(&batch);
            CommandOutput::Batch(batch)
        }
        Commands::Delete { value } => {
            let key = Key::string(&config.key_attribute, value);
            let deleted = store
                .delete_record(table, &key, config.return_values())
                .await
                .map_err(RunError::at(Operation::DeleteItem))?;
            printer.returned(deleted.as_ref());
            CommandOutput::Returned(deleted)
        }
    };

    Ok(output)
}
