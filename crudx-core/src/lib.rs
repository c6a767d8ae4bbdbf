//! Crudx core
//!
//! Types shared by the sql layer: bound parameter values and text rows.

pub mod error;
pub(crate) mod macros;
pub mod rowmap;
pub mod util;
pub mod value;

pub use error::*;
pub use rowmap::*;
pub use value::*;

pub use chrono;
pub(crate) use macros::*;
pub use rust_decimal;
pub use util::check_row_len;
