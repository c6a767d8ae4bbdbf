//! Sql Builder: dml mutation

use crudx_core::{D1Value, Value};

use super::{is_blank, placeholder_group, push_condition, sql_adt::Statement};
use crate::{DmlMutation, SqlBuilder, SqlError, SqlResult};

impl DmlMutation for SqlBuilder {
    /// `INSERT IGNORE <table>(<fields>) VALUES (?,?),(?,?),...`, one group per row
    fn insert(&self, table: &str, fields: &[&str], rows: &[&D1Value]) -> SqlResult<Statement> {
        if rows.is_empty() {
            return Err(SqlError::EmptyValues(table.to_owned()));
        }

        let group = placeholder_group(fields.len());
        let groups = vec![group.as_str(); rows.len()].join(",");
        let query = format!(
            "INSERT IGNORE {}({}) VALUES {}",
            table,
            fields.join(","),
            groups
        );
        let params = rows.iter().flat_map(|r| r.iter().cloned()).collect();

        Ok(Statement::new(query, params))
    }

    fn prepared_insert(&self, table: &str, fields: &[&str]) -> String {
        format!(
            "INSERT IGNORE {}({}) VALUES {}",
            table,
            fields.join(","),
            placeholder_group(fields.len())
        )
    }

    /// `UPDATE <table> SET k1=?,k2=? <condition>`, data values are bound before `args`.
    /// `args` are dropped along with a blank condition.
    fn update(
        &self,
        table: &str,
        data: &[(&str, Value)],
        condition: &str,
        args: &[Value],
    ) -> SqlResult<Statement> {
        if data.is_empty() {
            return Err(SqlError::new_common_error("update data is empty"));
        }

        let sets = data
            .iter()
            .map(|(k, _)| format!("{k}=?"))
            .collect::<Vec<_>>()
            .join(",");
        let mut query = format!("UPDATE {} SET {}", table, sets);
        let mut params = data.iter().map(|(_, v)| v.clone()).collect::<Vec<_>>();

        if !is_blank(condition) {
            push_condition(&mut query, condition);
            params.extend_from_slice(args);
        }

        Ok(Statement::new(query, params))
    }

    /// `DELETE FROM <table> <condition>`
    fn delete(&self, table: &str, condition: &str, args: &[Value]) -> Statement {
        let mut query = format!("DELETE FROM {}", table);
        push_condition(&mut query, condition);

        Statement::new(query, args.to_vec())
    }
}

#[cfg(test)]
mod test_mutation_dml {
    use super::*;
    use crudx_core::{value, values};

    #[test]
    fn test_insert() {
        let r1 = values!["Mike", 15];
        let r2 = values!["Shine", "28"];
        let s = SqlBuilder.insert("user", &["name", "age"], &[&r1, &r2]).unwrap();

        assert_eq!(s.query, "INSERT IGNORE user(name,age) VALUES (?,?),(?,?)");
        assert_eq!(s.params, values!["Mike", 15, "Shine", "28"]);
        assert_eq!(s.query.matches('?').count(), s.params.len());
    }

    #[test]
    fn test_insert_no_rows() {
        let res = SqlBuilder.insert("user", &["name", "age"], &[]);

        assert!(matches!(res, Err(SqlError::EmptyValues(t)) if t == "user"));
    }

    #[test]
    fn test_prepared_insert() {
        let sql = SqlBuilder.prepared_insert("user", &["name", "age"]);

        assert_eq!(sql, "INSERT IGNORE user(name,age) VALUES (?,?)");
    }

    #[test]
    fn test_update() {
        let data = [("age", value!(30)), ("name", value!("Tommy"))];
        let s = SqlBuilder
            .update("user", &data, "where name=?", &values!["Tom"])
            .unwrap();

        assert_eq!(s.query, "UPDATE user SET age=?,name=? where name=?");
        assert_eq!(s.params, values![30, "Tommy", "Tom"]);
    }

    #[test]
    fn test_update_blank_condition_drops_args() {
        let data = [("age", value!(30))];
        let s = SqlBuilder.update("user", &data, " ", &values!["Tom"]).unwrap();

        assert_eq!(s.query, "UPDATE user SET age=?");
        assert_eq!(s.params, values![30]);
    }

    #[test]
    fn test_update_empty_data() {
        let res = SqlBuilder.update("user", &[], "where name=?", &values!["Tom"]);

        assert!(matches!(res, Err(SqlError::Common(_))));
    }

    #[test]
    fn test_delete() {
        let s = SqlBuilder.delete("user", "where age<?", &values![30]);

        assert_eq!(s.query, "DELETE FROM user where age<?");
        assert_eq!(s.params, values![30]);

        let s = SqlBuilder.delete("user", "", &[]);
        assert_eq!(s.query, "DELETE FROM user");
    }
}
