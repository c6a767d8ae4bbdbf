//! Sql builder interface
//!
//! Conditions are literal sql fragments supplied by the caller, e.g. `"where name=?"`.
//! Their `?` placeholders are bound positionally from `args`.

use crudx_core::{D1Value, Value};

use super::sql_adt::Statement;
use crate::SqlResult;

// DDL Query
pub trait DdlQuery {
    fn list_tables(&self) -> String;
}

// DML Query
pub trait DmlQuery {
    fn select(
        &self,
        table: &str,
        fields: &[&str],
        condition: &str,
        args: &[Value],
        distinct: bool,
    ) -> Statement;

    fn select_one(
        &self,
        table: &str,
        fields: &[&str],
        condition: &str,
        args: &[Value],
        distinct: bool,
    ) -> Statement;
}

// DML Mutation
pub trait DmlMutation {
    /// multi-row `INSERT IGNORE`, every row must already match `fields` in length
    fn insert(&self, table: &str, fields: &[&str], rows: &[&D1Value]) -> SqlResult<Statement>;

    /// single-row `INSERT IGNORE`, meant to be prepared once and executed per row
    fn prepared_insert(&self, table: &str, fields: &[&str]) -> String;

    fn update(
        &self,
        table: &str,
        data: &[(&str, Value)],
        condition: &str,
        args: &[Value],
    ) -> SqlResult<Statement>;

    fn delete(&self, table: &str, condition: &str, args: &[Value]) -> Statement;
}
