//! Sql Builder: ddl query

use crate::{DdlQuery, SqlBuilder};

impl DdlQuery for SqlBuilder {
    /// list tables of the current database
    fn list_tables(&self) -> String {
        "SHOW TABLES".to_owned()
    }
}
