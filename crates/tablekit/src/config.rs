//! Run configuration.
//!
//! Every value the demo used to hardcode is a named option here, settable by
//! flag or environment variable. The struct is passed explicitly into the store
//! constructors; nothing reads process-wide state after parsing.

use clap::ValueEnum;
use tablekit_core::store::{ReturnValues, StoreError, MAX_LIST_TABLES_LIMIT};

pub const DEFAULT_REGION: &str = "ap-northeast-1";
pub const DEFAULT_TABLE_NAME: &str = "golang-example";
pub const DEFAULT_KEY_ATTRIBUTE: &str = "dummy";
pub const DEFAULT_TIMESTAMP_ATTRIBUTE: &str = "timestamp";
pub const DEFAULT_LIST_LIMIT: usize = 5;
pub const DEFAULT_GET_KEY: &str = "hoge";
pub const DEFAULT_DELETE_KEY: &str = "fuga";

/// Which store implementation to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// The DynamoDB service (or a local endpoint).
    #[default]
    Dynamodb,
    /// A process-local store seeded with the configured table.
    Memory,
}

/// Application configuration.
#[derive(Debug, Clone, clap::Args)]
pub struct Config {
    /// AWS region.
    #[arg(long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Custom endpoint URL (for local DynamoDB).
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Table to operate on.
    #[arg(long, env = "TABLEKIT_TABLE", default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// Partition key attribute of the table.
    #[arg(long, env = "TABLEKIT_KEY_ATTRIBUTE", default_value = DEFAULT_KEY_ATTRIBUTE)]
    pub key_attribute: String,

    /// Attribute that receives the write time on demo records.
    #[arg(
        long,
        env = "TABLEKIT_TIMESTAMP_ATTRIBUTE",
        default_value = DEFAULT_TIMESTAMP_ATTRIBUTE
    )]
    pub timestamp_attribute: String,

    /// Maximum number of table names to list.
    #[arg(long, env = "TABLEKIT_LIST_LIMIT", default_value_t = DEFAULT_LIST_LIMIT)]
    pub list_limit: usize,

    /// Key value the demo fetches.
    #[arg(long, default_value = DEFAULT_GET_KEY)]
    pub get_key: String,

    /// Key value the demo deletes.
    #[arg(long, default_value = DEFAULT_DELETE_KEY)]
    pub delete_key: String,

    /// Ask put and delete to return the attributes they replaced.
    #[arg(long)]
    pub return_old: bool,

    /// Store backend.
    #[arg(long, env = "TABLEKIT_BACKEND", value_enum, default_value_t = Backend::Dynamodb)]
    pub backend: Backend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            table_name: DEFAULT_TABLE_NAME.to_string(),
            key_attribute: DEFAULT_KEY_ATTRIBUTE.to_string(),
            timestamp_attribute: DEFAULT_TIMESTAMP_ATTRIBUTE.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            get_key: DEFAULT_GET_KEY.to_string(),
            delete_key: DEFAULT_DELETE_KEY.to_string(),
            return_old: false,
            backend: Backend::Dynamodb,
        }
    }
}

impl Config {
    /// Checks the values a store cannot work without.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.region.trim().is_empty() {
            return Err(StoreError::Config("region is empty".to_string()));
        }
        if self.table_name.trim().is_empty() {
            return Err(StoreError::Config("table name is empty".to_string()));
        }
        if self.key_attribute.trim().is_empty() {
            return Err(StoreError::Config("key attribute is empty".to_string()));
        }
        if self.list_limit == 0 || self.list_limit > MAX_LIST_TABLES_LIMIT {
            return Err(StoreError::Config(format!(
                "list limit must be between 1 and {MAX_LIST_TABLES_LIMIT}, got {}",
                self.list_limit
            )));
        }
        Ok(())
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match (self.backend, &self.endpoint_url) {
            (Backend::Memory, _) => "In-memory store".to_string(),
            (Backend::Dynamodb, Some(url)) => format!("Local DynamoDB ({})", url),
            (Backend::Dynamodb, None) => format!("AWS DynamoDB (region: {})", self.region),
        }
    }

    /// The return-values mode for put and delete.
    pub fn return_values(&self) -> ReturnValues {
        if self.return_old {
            ReturnValues::AllOld
        } else {
            ReturnValues::None
        }
    }
}
