//! crudx value
//!
//! This module contains the value type, which is the atomic unit of a bound sql parameter.
//!
//! Narrow integer and float types are widened on conversion, since the driver binds them
//! as 64-bit values anyway.

use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use super::impl_value_from;

/// pub type D1<T>
pub type D1<T> = Vec<T>;
/// a row of positional parameters
pub type D1Value = D1<Value>;

/// Value is what gets bound to a `?` placeholder.
#[derive(PartialEq, Clone, Debug)]
pub enum Value {
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Decimal(Decimal),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{:?}", v),
            Value::Bytes(v) => write!(f, "{:?}", v),
            Value::Date(v) => write!(f, "{}", v),
            Value::Time(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Null => write!(f, "null"),
        }
    }
}

// ================================================================================================
// Conversions
// ================================================================================================

impl_value_from!(bool, Bool);
impl_value_from!(String, String);
impl_value_from!(i64, I64);
impl_value_from!(u64, U64);
impl_value_from!(f64, F64);
impl_value_from!(i8, i64::from, I64);
impl_value_from!(i16, i64::from, I64);
impl_value_from!(i32, i64::from, I64);
impl_value_from!(u8, u64::from, U64);
impl_value_from!(u16, u64::from, U64);
impl_value_from!(u32, u64::from, U64);
impl_value_from!(f32, f64::from, F64);
impl_value_from!(Vec<u8>, Bytes);
impl_value_from!(NaiveDate, Date);
impl_value_from!(NaiveTime, Time);
impl_value_from!(NaiveDateTime, DateTime);
impl_value_from!(Decimal, Decimal);

impl_value_from!(Option<bool>, Bool);
impl_value_from!(Option<String>, String);
impl_value_from!(Option<i64>, I64);
impl_value_from!(Option<u64>, U64);
impl_value_from!(Option<f64>, F64);
impl_value_from!(Option<i8>, i64::from, I64);
impl_value_from!(Option<i16>, i64::from, I64);
impl_value_from!(Option<i32>, i64::from, I64);
impl_value_from!(Option<u8>, u64::from, U64);
impl_value_from!(Option<u16>, u64::from, U64);
impl_value_from!(Option<u32>, u64::from, U64);
impl_value_from!(Option<f32>, f64::from, F64);
impl_value_from!(Option<Vec<u8>>, Bytes);
impl_value_from!(Option<NaiveDate>, Date);
impl_value_from!(Option<NaiveTime>, Time);
impl_value_from!(Option<NaiveDateTime>, DateTime);
impl_value_from!(Option<Decimal>, Decimal);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<Option<&str>> for Value {
    fn from(ov: Option<&str>) -> Self {
        ov.map_or(Value::Null, Value::from)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}
