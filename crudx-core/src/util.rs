//! Crudx util
//!
//! utilities

use crate::{CoreError, CoreResult, Value};

/// length mismatch error
pub(crate) fn lms_err(expected: usize, actual: usize) -> CoreError {
    CoreError::new_length_mismatch_error(expected, actual)
}

/// a row of values is well-formed when it has exactly one value per field
pub fn check_row_len(fields_len: usize, row: &[Value]) -> CoreResult<()> {
    if fields_len != row.len() {
        return Err(lms_err(fields_len, row.len()));
    }
    Ok(())
}

#[cfg(test)]
mod test_util {
    use super::*;
    use crate::values;

    #[test]
    fn test_check_row_len() {
        assert!(check_row_len(2, &values!["Mike", 15]).is_ok());

        let res = check_row_len(2, &values!["Mike"]);
        assert!(matches!(
            res,
            Err(CoreError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }
}
