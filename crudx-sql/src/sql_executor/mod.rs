//! Sql Executor
//!
//! `executor.rs` holds the client, `processor.rs` & `types.rs` turn mysql rows into text.

pub mod executor;
pub(crate) mod macros;
pub(crate) mod processor;
pub(crate) mod types;

pub use executor::{MysqlClient, SqlEngine, SqlHelper};
pub(crate) use macros::*;
pub(crate) use processor::SqlRowProcessor;
