//! tablekit - a record access façade over DynamoDB and the demo that drives it.
//!
//! The record model and the `RecordStore` contract live in `tablekit_core`;
//! this crate holds configuration, the storage backends, the runners and the
//! CLI definitions used by the `tablekit` binary.

pub mod cli;
pub mod config;
pub mod output;
pub mod runner;
pub mod storage;

pub use config::{Backend, Config};
pub use runner::{run_command, run_demo, CommandOutput, RunError, RunReport};
pub use storage::open_store;
