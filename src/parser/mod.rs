//! JSON parser for table rows.
//!
//! Pure functions turning text into validated [`JsonRow`]s. Two layouts are
//! accepted:
//! - a JSON array of objects (`[{"id": 1}, {"id": 2}]`)
//! - JSON Lines, one object per line; blank lines are skipped
//!
//! Every row needs a string or integer `id`, unique across the input.

use crate::model::{JsonRow, JsonRowRejection, ParseError, Row, RowId};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Parse rows from JSON array or JSON Lines text.
///
/// Whitespace-only input yields no rows.
///
/// # Errors
///
/// Returns the first [`ParseError`] met, carrying the 1-based line (JSON
/// Lines) or element position (array) of the offending record.
///
/// # Examples
///
/// ```
/// use gridstate::model::Row;
/// use gridstate::parser::parse_rows;
///
/// let rows = parse_rows("{\"id\": 1, \"name\": \"a\"}\n\n{\"id\": \"x\"}\n").unwrap();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].id().as_str(), "x");
/// ```
pub fn parse_rows(text: &str) -> Result<Vec<JsonRow>, ParseError> {
    let rows = if text.trim_start().starts_with('[') {
        parse_array(text)?
    } else {
        parse_lines(text)?
    };
    debug!(rows = rows.len(), "Parsed rows");
    Ok(rows)
}

fn parse_array(text: &str) -> Result<Vec<JsonRow>, ParseError> {
    let values: Vec<Value> = serde_json::from_str(text).map_err(|e| ParseError::InvalidJson {
        line: e.line(),
        message: e.to_string(),
    })?;

    let records = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| (index + 1, value));
    collect_unique(records)
}

fn parse_lines(text: &str) -> Result<Vec<JsonRow>, ParseError> {
    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|e| ParseError::InvalidJson {
            line: index + 1,
            message: e.to_string(),
        })?;
        records.push((index + 1, value));
    }
    collect_unique(records)
}

/// Validate each `(record, value)` pair and reject repeated ids.
fn collect_unique(
    records: impl IntoIterator<Item = (usize, Value)>,
) -> Result<Vec<JsonRow>, ParseError> {
    let mut seen: HashSet<RowId> = HashSet::new();
    let mut rows = Vec::new();

    for (record, value) in records {
        let row = JsonRow::from_value(value).map_err(|rejection| match rejection {
            JsonRowRejection::NotAnObject => ParseError::NotAnObject { record },
            JsonRowRejection::MissingId => ParseError::MissingId { record },
            JsonRowRejection::InvalidId => ParseError::InvalidId { record },
        })?;

        let id = row.id();
        if seen.contains(&id) {
            return Err(ParseError::DuplicateId {
                record,
                id: id.to_string(),
            });
        }
        seen.insert(id);
        rows.push(row);
    }

    Ok(rows)
}
