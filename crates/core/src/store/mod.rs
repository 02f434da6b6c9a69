mod error;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use traits::RecordStore;
pub use types::{
    list_tables_limit, validate_batch, BatchPutOutput, Operation, ReturnValues, ScanOutput,
    MAX_BATCH_WRITE_ITEMS, MAX_LIST_TABLES_LIMIT,
};
