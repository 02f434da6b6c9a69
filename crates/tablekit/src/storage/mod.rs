//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `RecordStore` trait
//! defined in `tablekit_core::store`, and [`open_store`] to pick one from
//! configuration.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! The in-memory backend is always compiled in.

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub mod inmemory;

use std::sync::Arc;

use tablekit_core::store::{RecordStore, Result};

use crate::config::{Backend, Config};

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;
pub use inmemory::InMemoryStore;

/// Opens the backend selected in `config`.
///
/// The in-memory backend starts with the configured table declared and empty.
pub async fn open_store(config: &Config) -> Result<Arc<dyn RecordStore>> {
    config.validate()?;

    match config.backend {
        Backend::Memory => {
            let store = InMemoryStore::new();
            store
                .create_table(&config.table_name, &config.key_attribute)
                .await;
            Ok(Arc::new(store))
        }
        #[cfg(feature = "dynamodb")]
        Backend::Dynamodb => Ok(Arc::new(DynamoDbStore::from_config(config).await)),
        #[cfg(not(feature = "dynamodb"))]
        Backend::Dynamodb => Err(tablekit_core::store::StoreError::Config(
            "built without the 'dynamodb' feature".to_string(),
        )),
    }
}
