//! Row normalization: [`RawRow`] into [`UserRecord`].
//!
//! This is the core of the ingest pipeline. Each raw row contributes:
//!
//! - `name` - `name.firstName` and `name.lastName` joined with one space
//! - `age` - the `age` cell coerced to an integer
//! - `address`, `additional_info` - cells decoded as embedded JSON
//!
//! The transform is pure and order-preserving. The first failing row fails
//! the whole batch; persistence never starts, so no partial commit happens.

use serde_json::Value;

use crate::error::{TransformError, TransformResult};
use crate::models::{RawRow, UserRecord};

/// Source column holding the first name.
pub const COL_FIRST_NAME: &str = "name.firstName";
/// Source column holding the last name.
pub const COL_LAST_NAME: &str = "name.lastName";
/// Source column holding the age.
pub const COL_AGE: &str = "age";
/// Source column holding the JSON-encoded address.
pub const COL_ADDRESS: &str = "address";
/// Source column holding the JSON-encoded extra attributes.
pub const COL_ADDITIONAL_INFO: &str = "additional_info";

/// Normalize a batch of raw rows.
///
/// Output preserves input order. Any missing column, non-integer age, or
/// malformed JSON cell aborts the batch with the offending row number.
pub fn transform_rows(rows: &[RawRow]) -> TransformResult<Vec<UserRecord>> {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| transform_row(row, idx + 1))
        .collect()
}

/// Normalize one raw row. `row_num` is 1-based, header excluded.
pub fn transform_row(row: &RawRow, row_num: usize) -> TransformResult<UserRecord> {
    let first = require(row, COL_FIRST_NAME, row_num)?;
    let last = require(row, COL_LAST_NAME, row_num)?;
    let name = format!("{} {}", first, last);

    let age_raw = require(row, COL_AGE, row_num)?;
    let age: i32 = age_raw
        .trim()
        .parse()
        .map_err(|_| TransformError::InvalidAge {
            row: row_num,
            value: age_raw.to_string(),
        })?;

    let address = decode_json_cell(row, COL_ADDRESS, row_num)?;
    let additional_info = decode_json_cell(row, COL_ADDITIONAL_INFO, row_num)?;

    Ok(UserRecord {
        name,
        age,
        address,
        additional_info,
    })
}

fn require<'a>(row: &'a RawRow, column: &str, row_num: usize) -> TransformResult<&'a str> {
    row.get(column)
        .map(|s| s.as_str())
        .ok_or_else(|| TransformError::MissingColumn {
            row: row_num,
            column: column.to_string(),
        })
}

fn decode_json_cell(row: &RawRow, column: &str, row_num: usize) -> TransformResult<Value> {
    let cell = require(row, column, row_num)?;
    serde_json::from_str(cell).map_err(|e| TransformError::InvalidJson {
        row: row_num,
        column: column.to_string(),
        message: e.to_string(),
    })
}
