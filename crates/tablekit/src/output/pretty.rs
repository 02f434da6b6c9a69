//! Pretty output formatting.
//!
//! Pure functions turning store results into log lines.

use tablekit_core::record::{Key, Record};
use tablekit_core::store::{BatchPutOutput, Operation, ScanOutput};

const BANNER_RULE: &str = "##################";

/// Format the banner announcing an operation.
pub fn banner(operation: Operation) -> String {
    format!("{BANNER_RULE} {operation} {BANNER_RULE}")
}

/// Format a table listing.
pub fn format_tables(tables: &[String]) -> Vec<String> {
    let mut lines = vec!["Tables:".to_string()];
    lines.extend(tables.iter().cloned());
    lines
}

/// Format every attribute of a record, one line each.
pub fn format_record(record: &Record) -> Vec<String> {
    record
        .iter()
        .map(|(name, value)| format!("Item key: {} --> {}", name, value))
        .collect()
}

/// Format scan metadata followed by every item.
pub fn format_scan(output: &ScanOutput) -> Vec<String> {
    let mut lines = vec![format!("Count {}", output.count)];
    if let Some(capacity) = output.consumed_capacity {
        lines.push(format!("ConsumedCapacity {}", capacity));
    }
    lines.push(format!("ScannedCount {}", output.scanned_count));
    if output.truncated {
        lines.push("Scan stopped at the page limit; more records remain".to_string());
    }
    for item in &output.items {
        lines.extend(format_record(item));
    }
    lines
}

/// Format the result of a get.
pub fn format_fetched(key: &Key, record: Option<&Record>) -> Vec<String> {
    match record {
        Some(record) => format_record(record),
        None => vec![format!("No item found for {}", key)],
    }
}

/// Format the attributes a put or delete handed back.
pub fn format_returned(record: Option<&Record>) -> Vec<String> {
    record.map(format_record).unwrap_or_default()
}

/// Format the outcome of a batch put.
pub fn format_batch(output: &BatchPutOutput) -> Vec<String> {
    if output.is_complete() {
        return vec!["All records processed".to_string()];
    }
    let mut lines = vec![format!("Unprocessed records: {}", output.unprocessed.len())];
    for record in &output.unprocessed {
        lines.extend(format_record(record));
    }
    lines
}
