//! Crudx Sql Executor Macros

/// impl SqlTypeTagMarker for SqlTypeTag, used in `types.rs`
///
/// Equivalent to:
///
/// ```rust,ignore
/// impl SqlTypeTagMarker for SqlTypeTag<NaiveDate> {
///     fn to_str(&self) -> &str {
///         self.0
///     }
///
///     fn extract_text(&self, sql_row: &MySqlRow, idx: usize, parse_time: bool) -> SqlResult<String> {
///         let v: NaiveDate = sql_row.try_get_unchecked(idx)?;
///         Ok(render_date(v, parse_time))
///     }
/// }
/// ```
///
/// The marker is picked by the column's type name, so the driver's own compatibility check
/// is skipped (e.g. `YEAR` read as `u64`).
///
/// Date types take a `zero` text, returned for mysql's `0000-00-00` values, which the driver
/// can't decode into a chrono type.
macro_rules! impl_sql_type_tag_marker {
    ($dtype:ty, $render:ident, zero = $zero:expr) => {
        impl SqlTypeTagMarker for SqlTypeTag<$dtype> {
            fn to_str(&self) -> &str {
                self.0
            }

            fn extract_text(
                &self,
                sql_row: &MySqlRow,
                idx: usize,
                parse_time: bool,
            ) -> $crate::SqlResult<String> {
                let raw: Vec<u8> = sql_row.try_get_unchecked(idx)?;
                if is_zero_date(&raw) {
                    return Ok($zero.to_owned());
                }

                let v: $dtype = sql_row.try_get_unchecked(idx)?;
                Ok($render(v, parse_time))
            }
        }
    };
    ($dtype:ty, $render:ident) => {
        impl SqlTypeTagMarker for SqlTypeTag<$dtype> {
            fn to_str(&self) -> &str {
                self.0
            }

            fn extract_text(
                &self,
                sql_row: &MySqlRow,
                idx: usize,
                parse_time: bool,
            ) -> $crate::SqlResult<String> {
                let v: $dtype = sql_row.try_get_unchecked(idx)?;
                Ok($render(v, parse_time))
            }
        }
    };
}

/// tmap pair
macro_rules! tmap_pair {
    ($key:expr, $value:ty) => {
        (
            $key,
            Box::new(SqlTypeTag::<$value>::new($key)) as Box<dyn SqlTypeTagMarker>,
        )
    };
}

pub(crate) use impl_sql_type_tag_marker;
pub(crate) use tmap_pair;

/// build a sqlx query from a `Statement` and bind its params. used in `executor.rs`
///
/// Equivalent to:
///
/// ```rust,ignore
/// bind_values(sqlx::query(&stmt.query), &stmt.params)
/// ```
macro_rules! statement_query {
    ($stmt:expr) => {
        $crate::sql_executor::types::bind_values(sqlx::query(&$stmt.query), &$stmt.params)
    };
}

pub(crate) use statement_query;

/// log an error and bail out with a fallback. used in `executor.rs`
///
/// Equivalent to:
///
/// ```rust,ignore
/// match res {
///     Ok(v) => v,
///     Err(e) => {
///         log::error!(target: self.log_target(), "update user failed: {}", e);
///         return 0;
///     }
/// }
/// ```
macro_rules! ok_or_log {
    ($target:expr, $res:expr, $fallback:expr, $($arg:tt)+) => {
        match $res {
            Ok(v) => v,
            Err(e) => {
                log::error!(target: $target, "{}: {}", format_args!($($arg)+), e);
                return $fallback;
            }
        }
    };
}

pub(crate) use ok_or_log;
