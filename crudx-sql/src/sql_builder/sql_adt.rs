//! Crudx SqlBuilder ADT
//!
//! 1. Statement
//! 1. ExecutionResult

use crudx_core::{D1Value, Value};
use sqlx::mysql::MySqlQueryResult;

// ================================================================================================
// Statement
// ================================================================================================

/// A sql string with `?` placeholders and the values bound to them, in order
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub query: String,
    pub params: D1Value,
}

impl Statement {
    pub fn new<T: Into<String>>(query: T, params: D1Value) -> Self {
        Statement {
            query: query.into(),
            params,
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self
            .params
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}; params: [{}]", self.query, params)
    }
}

// ================================================================================================
// ExecutionResult
// ================================================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub rows_affected: u64,
    pub last_insert_id: u64,
}

/// turn MySqlQueryResult into ExecutionResult
impl From<MySqlQueryResult> for ExecutionResult {
    fn from(result: MySqlQueryResult) -> Self {
        ExecutionResult {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_id(),
        }
    }
}
