//! Single-column sorting.
//!
//! The sort state is `Option<SortConfig>`:
//! - `None`: insertion order
//! - `Some(key, Ascending)` / `Some(key, Descending)`
//!
//! Header activation moves between these with [`header_transition`]; the rows
//! are ordered with [`apply_sort`].

use crate::model::{compare_values, CellValue, Column};
use serde::Serialize;
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first, nulls first.
    Ascending,
    /// Largest first, nulls last.
    Descending,
}

impl SortDirection {
    /// The other direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// The active sort: which column and which direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SortConfig {
    /// Key of the column being sorted.
    pub key: String,
    /// Direction of the sort.
    pub direction: SortDirection,
}

impl SortConfig {
    /// Ascending sort by `key`.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort by `key`.
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Next sort state after the header of column `key` is activated.
///
/// - unknown or non-sortable column: unchanged
/// - unsorted, or sorted by another column: ascending by `key`
/// - ascending by `key`: descending by `key`
/// - descending by `key`: ascending by `key`
///
/// Header activation never returns to the unsorted state.
pub fn header_transition<R>(
    current: Option<&SortConfig>,
    columns: &[Column<R>],
    key: &str,
) -> Option<SortConfig> {
    let sortable = columns
        .iter()
        .any(|column| column.key() == key && column.is_sortable());
    if !sortable {
        return current.cloned();
    }

    match current {
        Some(active) if active.key == key => Some(SortConfig {
            key: active.key.clone(),
            direction: active.direction.toggled(),
        }),
        _ => Some(SortConfig::ascending(key)),
    }
}

/// Order rows by the active sort.
///
/// Returns references in the new order; the input is left untouched. With no
/// sort, or a sort key that matches no column, the input order is kept. The
/// sort is stable: rows whose values compare equal keep their relative order.
pub fn apply_sort<'a, R>(
    rows: &'a [R],
    columns: &[Column<R>],
    sort: Option<&SortConfig>,
) -> Vec<&'a R> {
    let Some(sort) = sort else {
        return rows.iter().collect();
    };
    let Some(column) = columns.iter().find(|column| column.key() == sort.key) else {
        tracing::warn!(key = %sort.key, "Sort key matches no column; keeping input order");
        return rows.iter().collect();
    };

    // Extract each value once rather than once per comparison.
    let mut keyed: Vec<(CellValue, &'a R)> =
        rows.iter().map(|row| (column.value(row), row)).collect();
    keyed.sort_by(|(a, _), (b, _)| sort.direction.apply(compare_values(a, b)));
    keyed.into_iter().map(|(_, row)| row).collect()
}
