//! Crudx SQL
//!
//! CRUD helpers for mysql, built on a `sqlx` connection pool.

pub mod error;
pub mod options;
pub mod sql_builder;
pub mod sql_executor;

pub use error::{NomError, SqlError, SqlResult};
pub use options::Options;
pub use sql_builder::builder::SqlBuilder;
pub use sql_builder::interface::{DdlQuery, DmlMutation, DmlQuery};
pub use sql_builder::sql_adt;
pub use sql_executor::*;

pub use crudx_core::{value, values, D1Value, Rowmap, Value};
pub use sqlx::mysql::{MySqlPool, MySqlQueryResult, MySqlRow, MySqlStatement};
