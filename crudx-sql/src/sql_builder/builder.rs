//! Sql builder

use itertools::Itertools;

/// SqlBuilder
///
/// Assembles mysql statements. Holds no state; all the methods live in the
/// `DdlQuery`, `DmlQuery` and `DmlMutation` impls.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlBuilder;

/// `(?,?,?)` for `n` fields
pub(crate) fn placeholder_group(n: usize) -> String {
    format!("({})", std::iter::repeat("?").take(n).join(","))
}

/// append a caller supplied fragment, blank fragments are dropped
pub(crate) fn push_condition(sql: &mut String, condition: &str) {
    let condition = condition.trim();
    if !condition.is_empty() {
        sql.push(' ');
        sql.push_str(condition);
    }
}

pub(crate) fn is_blank(condition: &str) -> bool {
    condition.trim().is_empty()
}
