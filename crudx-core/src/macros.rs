//! Crudx core macros
//!
//! This module contains macros used by the crudx core:
//! 1. impl_value_from
//! 1. value
//! 1. values

/// Type conversion: standard type into Value. Used in `value.rs`.
///
/// Equivalent to:
///
/// ```rust,ignore
/// impl From<Option<bool>> for Value {
///     fn from(ov: Option<bool>) -> Self {
///         match ov {
///             Some(v) => Value::Bool(v),
///             None => Value::Null,
///         }
///     }
/// }
/// ```
///
/// and, with a widening wrapper:
///
/// ```rust,ignore
/// impl From<i32> for Value {
///     fn from(v: i32) -> Self {
///         Value::I64(i64::from(v))
///     }
/// }
/// ```
macro_rules! impl_value_from {
    (Option<$ftype:ty>, $val_var:ident) => {
        impl From<Option<$ftype>> for Value {
            fn from(ov: Option<$ftype>) -> Self {
                match ov {
                    Some(v) => $crate::Value::$val_var(v),
                    None => $crate::Value::Null,
                }
            }
        }
    };
    ($ftype:ty, $val_var:ident) => {
        impl From<$ftype> for Value {
            fn from(v: $ftype) -> Self {
                $crate::Value::$val_var(v)
            }
        }
    };
    (Option<$ftype:ty>, $wrapper:expr, $val_var:ident) => {
        impl From<Option<$ftype>> for Value {
            fn from(ov: Option<$ftype>) -> Self {
                match ov {
                    Some(v) => $crate::Value::$val_var($wrapper(v)),
                    None => $crate::Value::Null,
                }
            }
        }
    };
    ($ftype:ty, $wrapper:expr, $val_var:ident) => {
        impl From<$ftype> for Value {
            fn from(v: $ftype) -> Self {
                $crate::Value::$val_var($wrapper(v))
            }
        }
    };
}

pub(crate) use impl_value_from;

/// value creation macro
#[macro_export]
macro_rules! value {
    ($val:expr) => {{
        $crate::Value::from($val)
    }};
}

/// a row of values, each element converted by `Value::from`
///
/// ```rust
/// use crudx_core::{values, Value};
///
/// let row = values!["Mike", 15, None::<i64>];
/// assert_eq!(row, vec![Value::from("Mike"), Value::I64(15), Value::Null]);
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($val:expr),+ $(,)?) => {
        vec![$($crate::Value::from($val)),+]
    };
}
