//! Output formatting functions.

pub mod json;
pub mod pretty;

use serde::Serialize;
use tablekit_core::record::{Key, Record};
use tablekit_core::store::{BatchPutOutput, Operation, ScanOutput};

use crate::cli::OutputFormat;

/// Writes operation results to the log stream (pretty) or stdout (json).
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Announces the start of an operation. Silent in json mode.
    pub fn banner(&self, operation: Operation) {
        if let OutputFormat::Pretty = self.format {
            tracing::info!("{}", pretty::banner(operation));
        }
    }

    pub fn tables(&self, tables: &[String]) {
        self.print(tables, || pretty::format_tables(tables));
    }

    pub fn scan(&self, output: &ScanOutput) {
        self.print(output, || pretty::format_scan(output));
    }

    pub fn fetched(&self, key: &Key, record: Option<&Record>) {
        self.print(&record, || pretty::format_fetched(key, record));
    }

    pub fn returned(&self, record: Option<&Record>) {
        self.print(&record, || pretty::format_returned(record));
    }

    pub fn batch(&self, output: &BatchPutOutput) {
        self.print(output, || pretty::format_batch(output));
    }

    fn print<T, F>(&self, value: &T, lines: F)
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> Vec<String>,
    {
        match self.format {
            OutputFormat::Json => println!("{}", json::format_json(value)),
            OutputFormat::Pretty => {
                for line in lines() {
                    tracing::info!("{}", line);
                }
            }
        }
    }
}
