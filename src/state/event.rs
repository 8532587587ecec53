//! User intent delivered to the table engine.

use crate::model::{GridError, RowId};
use std::fmt;
use std::str::FromStr;

/// One user action on the table.
///
/// These represent intent, not input devices: a click on a header, a
/// checkbox, or a pager button all become one of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableEvent<Id> {
    /// A column header was activated (sort toggle). Field: column key.
    HeaderActivated(String),
    /// A row's selection control was activated. Field: row id.
    RowActivated(Id),
    /// The select-all control was activated.
    SelectAllActivated,
    /// Go to the next page.
    NextPage,
    /// Go to the previous page.
    PrevPage,
    /// Go to a specific page (1-based, clamped).
    GoToPage(usize),
    /// Go to page 1.
    FirstPage,
    /// Go to the last page.
    LastPage,
    /// Return to insertion order.
    ClearSort,
    /// Deselect every row.
    ClearSelection,
}

/// Whether handling an event changed any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Sort, selection or page changed.
    Changed,
    /// Nothing changed (no-op or clamped navigation).
    Unchanged,
}

impl EventOutcome {
    /// Build from a "did it change" flag.
    pub fn from_changed(changed: bool) -> Self {
        if changed {
            Self::Changed
        } else {
            Self::Unchanged
        }
    }

    /// Whether state changed.
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

// ===== Textual form =====
//
// sort:<key>  select:<id>  select-all  next  prev  page:<n>
// first  last  clear-sort  clear-selection

impl FromStr for TableEvent<RowId> {
    type Err = GridError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| GridError::InvalidEvent {
            raw: raw.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = raw.trim();
        let (name, argument) = match trimmed.split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (trimmed, None),
        };

        match (name, argument) {
            ("sort", Some(key)) if !key.is_empty() => Ok(Self::HeaderActivated(key.to_string())),
            ("select", Some(id)) if !id.is_empty() => Ok(Self::RowActivated(RowId::new(id))),
            ("page", Some(n)) => n
                .parse::<usize>()
                .map(Self::GoToPage)
                .map_err(|_| invalid("page must be a non-negative integer")),
            ("sort" | "select" | "page", _) => Err(invalid("missing argument after ':'")),
            ("select-all", None) => Ok(Self::SelectAllActivated),
            ("next", None) => Ok(Self::NextPage),
            ("prev", None) => Ok(Self::PrevPage),
            ("first", None) => Ok(Self::FirstPage),
            ("last", None) => Ok(Self::LastPage),
            ("clear-sort", None) => Ok(Self::ClearSort),
            ("clear-selection", None) => Ok(Self::ClearSelection),
            (_, Some(_)) => Err(invalid("unexpected argument")),
            _ => Err(invalid("unknown event")),
        }
    }
}

impl<Id: fmt::Display> fmt::Display for TableEvent<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeaderActivated(key) => write!(f, "sort:{key}"),
            Self::RowActivated(id) => write!(f, "select:{id}"),
            Self::SelectAllActivated => f.write_str("select-all"),
            Self::NextPage => f.write_str("next"),
            Self::PrevPage => f.write_str("prev"),
            Self::GoToPage(page) => write!(f, "page:{page}"),
            Self::FirstPage => f.write_str("first"),
            Self::LastPage => f.write_str("last"),
            Self::ClearSort => f.write_str("clear-sort"),
            Self::ClearSelection => f.write_str("clear-selection"),
        }
    }
}
