//! Sql Builder: dml query

use crudx_core::Value;

use super::{push_condition, sql_adt::Statement};
use crate::{DmlQuery, SqlBuilder};

const LIMIT_ONE: &str = "LIMIT 1";

impl DmlQuery for SqlBuilder {
    /// `SELECT [DISTINCT] <fields> FROM <table> <condition>`
    fn select(
        &self,
        table: &str,
        fields: &[&str],
        condition: &str,
        args: &[Value],
        distinct: bool,
    ) -> Statement {
        let mut query = String::from("SELECT ");
        if distinct {
            query.push_str("DISTINCT ");
        }
        query.push_str(&fields.join(","));
        query.push_str(" FROM ");
        query.push_str(table);
        push_condition(&mut query, condition);

        Statement::new(query, args.to_vec())
    }

    /// same as `select`, with `LIMIT 1` appended to the condition
    fn select_one(
        &self,
        table: &str,
        fields: &[&str],
        condition: &str,
        args: &[Value],
        distinct: bool,
    ) -> Statement {
        let condition = format!("{} {}", condition.trim(), LIMIT_ONE);
        self.select(table, fields, &condition, args, distinct)
    }
}
