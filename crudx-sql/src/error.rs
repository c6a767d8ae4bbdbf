//! Crudx sql error
//!
//! This module contains the error types for the database.

use std::fmt::Display;

use crudx_core::{CommonError, CoreError};
use nom::error::{ErrorKind, ParseError};
use thiserror::Error;

pub type SqlResult<T> = Result<T, SqlError>;

// ================================================================================================
// Nom error
// ================================================================================================

#[derive(Debug)]
pub struct NomError(String);

impl std::fmt::Display for NomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: AsRef<str>> From<(T, ErrorKind)> for NomError {
    fn from(error: (T, ErrorKind)) -> Self {
        let (s, kind) = error;
        NomError(format!("Nom error code: {}, {:?}", s.as_ref(), kind))
    }
}

impl<T: AsRef<str>> ParseError<T> for NomError {
    fn from_error_kind(input: T, kind: ErrorKind) -> Self {
        NomError(format!("Nom error code: {:?}, at: {:?}", kind, input.as_ref()))
    }

    fn append(_: T, kind: ErrorKind, other: Self) -> Self {
        NomError(format!("{:?}\nerror code: {:?}", other, kind))
    }
}

#[derive(Error, Debug)]
pub enum SqlError {
    #[error("common error {0}")]
    Common(CommonError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),

    #[error(transparent)]
    Nom(#[from] nom::Err<NomError>),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("no well-formed rows to insert into {0}")]
    EmptyValues(String),
}

impl SqlError {
    pub fn new_common_error<T>(msg: T) -> SqlError
    where
        T: Into<CommonError>,
    {
        SqlError::Common(msg.into())
    }

    pub fn new_invalid_config_error<T>(msg: T) -> SqlError
    where
        T: Display,
    {
        SqlError::InvalidConfig(msg.to_string())
    }

    /// whether the driver reported an empty result as an error
    pub fn is_row_not_found(&self) -> bool {
        matches!(self, SqlError::Sqlx(sqlx::Error::RowNotFound))
    }
}
