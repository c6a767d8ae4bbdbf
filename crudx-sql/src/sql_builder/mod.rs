//! Crudx SQL builder

pub mod builder;
pub mod interface;
pub mod mutation_dml;
pub mod query_ddl;
pub mod query_dml;
pub mod sql_adt;

pub(crate) use builder::*;
