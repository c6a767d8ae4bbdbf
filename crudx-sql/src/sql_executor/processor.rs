//! Sql row processor

use crudx_core::Rowmap;
use itertools::Itertools;
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use super::types::{type_name_into_marker, OptMarker};
use crate::{SqlError, SqlResult};

/// SqlRowProcessor turns mysql rows into `Rowmap`s, every value rendered as text
pub(crate) struct SqlRowProcessor {
    parse_time: bool,
    cache_columns: Option<Vec<(String, OptMarker)>>,
}

impl SqlRowProcessor {
    pub fn new(parse_time: bool) -> Self {
        SqlRowProcessor {
            parse_time,
            cache_columns: None,
        }
    }

    /// since each row has the same columns, saving names and markers in cache for future use
    fn caching(&mut self, sql_row: &MySqlRow) -> &[(String, OptMarker)] {
        self.cache_columns.get_or_insert_with(|| {
            sql_row
                .columns()
                .iter()
                .map(|c| {
                    (
                        c.name().to_owned(),
                        type_name_into_marker(c.type_info().name()),
                    )
                })
                .collect_vec()
        })
    }

    /// converting a sql row into a `Rowmap`, SQL NULL becomes an empty string
    pub fn process(&mut self, sql_row: &MySqlRow) -> SqlResult<Rowmap> {
        let parse_time = self.parse_time;
        let mut res = Rowmap::default();

        for (idx, (name, marker)) in self.caching(sql_row).iter().enumerate() {
            let text = if sql_row.try_get_raw(idx)?.is_null() {
                String::new()
            } else {
                marker
                    .extract_text(sql_row, idx, parse_time)
                    .map_err(|e| {
                        SqlError::new_common_error(format!(
                            "column {} as {}: {}",
                            name,
                            marker.to_str(),
                            e
                        ))
                    })?
            };
            res.insert(name.as_str(), text);
        }

        Ok(res)
    }
}
