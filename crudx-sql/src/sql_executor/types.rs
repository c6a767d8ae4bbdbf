//! Sql types
//!
//! Based on Sqlx mysql types mapping: https://docs.rs/sqlx/latest/sqlx/mysql/types/index.html
//!
//! Every column is marshaled to text. The marker of a column is chosen by its type name,
//! types without a marker are read as raw bytes.

use std::{collections::HashMap, marker::PhantomData};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};
use crudx_core::Value;
use sqlx::mysql::types::MySqlTime;
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::query::Query;
use sqlx::{MySql, Row};

use super::{impl_sql_type_tag_marker, tmap_pair};
use crate::SqlResult;

pub(crate) const DATE_FMT: &str = "%Y-%m-%d";
pub(crate) const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub(crate) const ZERO_DATE: &str = "0000-00-00";
pub(crate) const ZERO_DATETIME: &str = "0000-00-00 00:00:00";

/// type alias
pub(crate) type OptMarker = &'static dyn SqlTypeTagMarker;

/// a sqlx mysql query whose arguments are still open for binding
pub(crate) type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

/// Sql type tag is used to tag static str to the Rust type a column is decoded into
#[derive(Debug)]
pub(crate) struct SqlTypeTag<T>(&'static str, PhantomData<T>);

impl<T> SqlTypeTag<T> {
    pub(crate) const fn new(st: &'static str) -> Self {
        SqlTypeTag(st, PhantomData)
    }
}

/// Behavior of SqlTypeTag, used to create trait objects and saving them to the global static HashMap
pub(crate) trait SqlTypeTagMarker: Send + Sync {
    /// to &str
    fn to_str(&self) -> &str;

    /// extract a non-null column as text
    fn extract_text(&self, sql_row: &MySqlRow, idx: usize, parse_time: bool) -> SqlResult<String>;
}

// ================================================================================================
// rendering
// ================================================================================================

fn render_display<T: ToString>(v: T, _parse_time: bool) -> String {
    v.to_string()
}

fn render_bytes(v: Vec<u8>, _parse_time: bool) -> String {
    String::from_utf8_lossy(&v).into_owned()
}

pub(crate) fn render_date(v: NaiveDate, parse_time: bool) -> String {
    if parse_time {
        render_datetime(v.and_time(NaiveTime::MIN), parse_time)
    } else {
        v.format(DATE_FMT).to_string()
    }
}

/// TIME is an interval (`-838:59:59` to `838:59:59`), not a time of day
pub(crate) fn render_time(v: MySqlTime, _parse_time: bool) -> String {
    let sign = if v.is_negative() { "-" } else { "" };
    let mut text = format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        v.hours(),
        v.minutes(),
        v.seconds()
    );
    if v.microseconds() != 0 {
        text.push_str(&format!(".{:06}", v.microseconds()));
    }
    text
}

/// `parse_time` renders RFC 3339 in UTC, otherwise mysql's own text format
pub(crate) fn render_datetime(v: NaiveDateTime, parse_time: bool) -> String {
    if parse_time {
        v.and_utc().to_rfc3339_opts(SecondsFormat::AutoSi, true)
    } else {
        v.format(DATETIME_FMT).to_string()
    }
}

/// `0000-00-00` dates carry an empty binary payload (only the length prefix is left),
/// or the zero text itself from a text-protocol result
pub(crate) fn is_zero_date(raw: &[u8]) -> bool {
    raw.iter().all(|b| *b == 0) || raw.starts_with(ZERO_DATE.as_bytes())
}

// ================================================================================================
// impl SqlTypeTagMarker for SqlTypeTag<T>
// ================================================================================================

impl_sql_type_tag_marker!(i64, render_display);
impl_sql_type_tag_marker!(u64, render_display);
impl_sql_type_tag_marker!(f32, render_display);
impl_sql_type_tag_marker!(f64, render_display);
impl_sql_type_tag_marker!(NaiveDate, render_date, zero = ZERO_DATE);
impl_sql_type_tag_marker!(MySqlTime, render_time);
impl_sql_type_tag_marker!(NaiveDateTime, render_datetime, zero = ZERO_DATETIME);
impl_sql_type_tag_marker!(Vec<u8>, render_bytes);

// ================================================================================================
// static types mapping
// ================================================================================================

/// strings, decimals, json, enums, sets and blobs all come as bytes
static RAW_MARKER: SqlTypeTag<Vec<u8>> = SqlTypeTag::new("RAW");

lazy_static::lazy_static! {
    /// Mysql Type Mapping: &'static str -> SqlTypeTag instance
    pub(crate) static ref MYSQL_TMAP: HashMap<&'static str, Box<dyn SqlTypeTagMarker>> = {
        HashMap::from([
            tmap_pair!("BOOLEAN", i64),
            tmap_pair!("TINYINT", i64),
            tmap_pair!("SMALLINT", i64),
            tmap_pair!("MEDIUMINT", i64),
            tmap_pair!("INT", i64),
            tmap_pair!("BIGINT", i64),
            tmap_pair!("TINYINT UNSIGNED", u64),
            tmap_pair!("SMALLINT UNSIGNED", u64),
            tmap_pair!("MEDIUMINT UNSIGNED", u64),
            tmap_pair!("INT UNSIGNED", u64),
            tmap_pair!("BIGINT UNSIGNED", u64),
            tmap_pair!("YEAR", u64),
            tmap_pair!("BIT", u64),
            tmap_pair!("FLOAT", f32),
            tmap_pair!("DOUBLE", f64),
            tmap_pair!("DATE", NaiveDate),
            tmap_pair!("TIME", MySqlTime),
            tmap_pair!("DATETIME", NaiveDateTime),
            tmap_pair!("TIMESTAMP", NaiveDateTime),
        ])
    };
}

/// marker of a column type name, falls back to raw bytes
pub(crate) fn type_name_into_marker(type_name: &str) -> OptMarker {
    match MYSQL_TMAP.get(type_name) {
        Some(m) => m.as_ref(),
        None => &RAW_MARKER,
    }
}

// ================================================================================================
// binding
// ================================================================================================

/// Type conversion: from Value to a bound mysql argument
pub(crate) fn bind_value<'q>(query: MySqlQuery<'q>, value: &Value) -> MySqlQuery<'q> {
    match value.clone() {
        Value::Bool(v) => query.bind(v),
        Value::I64(v) => query.bind(v),
        Value::U64(v) => query.bind(v),
        Value::F64(v) => query.bind(v),
        Value::String(v) => query.bind(v),
        Value::Bytes(v) => query.bind(v),
        Value::Date(v) => query.bind(v),
        Value::Time(v) => query.bind(v),
        Value::DateTime(v) => query.bind(v),
        Value::Decimal(v) => query.bind(v),
        Value::Null => query.bind(None::<String>),
    }
}

/// bind values positionally
pub(crate) fn bind_values<'q>(query: MySqlQuery<'q>, values: &[Value]) -> MySqlQuery<'q> {
    values.iter().fold(query, bind_value)
}
