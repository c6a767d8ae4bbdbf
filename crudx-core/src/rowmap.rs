//! Crudx Rowmap
//!
//! A single result row: column name -> value rendered as text.

use std::collections::BTreeMap;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Rowmap {
    pub data: BTreeMap<String, String>,
}

impl Rowmap {
    /// Rowmap constructor
    pub fn new(data: BTreeMap<String, String>) -> Self {
        Rowmap { data }
    }

    /// Rowmap constructor, from column/value pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// get data
    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.data
    }

    /// get a column's text
    pub fn get(&self, column: &str) -> Option<&str> {
        self.data.get(column).map(String::as_str)
    }

    /// get a column's text and parse it, e.g. `row.get_parsed::<i64>("age")`
    pub fn get_parsed<T>(&self, column: &str) -> CoreResult<T>
    where
        T: FromStr,
    {
        let text = self
            .get(column)
            .ok_or_else(|| CoreError::new_common_error(format!("column {column} not found")))?;

        text.parse::<T>()
            .map_err(|_| CoreError::new_parse_error(text, std::any::type_name::<T>()))
    }

    pub fn insert<K, V>(&mut self, column: K, value: V) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.data.insert(column.into(), value.into())
    }

    /// column names, in order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// check if the row is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// row length
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

impl<K, V> FromIterator<(K, V)> for Rowmap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Rowmap {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Index<&str> for Rowmap {
    type Output = str;

    fn index(&self, column: &str) -> &Self::Output {
        match self.get(column) {
            Some(v) => v,
            None => panic!("column {column} not found in row"),
        }
    }
}

impl IntoIterator for Rowmap {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}
