//! Pure core integration functions.
//!
//! Glue between parsed input, configuration and the table engine, used by the
//! command-line driver. Everything here is testable without I/O.

use crate::config::TableConfig;
use crate::model::{Column, ColumnSpec, GridError, JsonRow, RowId};
use crate::state::{TableEvent, TableState};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// Columns for a run.
///
/// Configured specs win; otherwise one sortable column per top-level field of
/// the first row (`id` excluded). No rows and no specs means no columns.
pub fn build_columns(specs: Option<&[ColumnSpec]>, rows: &[JsonRow]) -> Vec<Column<JsonRow>> {
    let inferred;
    let specs = match specs {
        Some(specs) => specs,
        None => {
            inferred = rows.first().map(ColumnSpec::infer).unwrap_or_default();
            inferred.as_slice()
        }
    };
    specs.iter().map(ColumnSpec::to_column).collect()
}

/// Result of replaying an event script.
#[derive(Debug)]
pub struct ScriptRun {
    /// The table after the last event.
    pub table: TableState<JsonRow>,
    /// Every observer payload, in notification order.
    pub notifications: Vec<Vec<JsonRow>>,
}

/// Build a table from `rows` and replay `events` against it in order.
///
/// # Errors
///
/// Returns the first [`GridError`]: duplicate column keys or row ids, or an
/// event naming an unknown row. Events after a failing one are not applied.
pub fn run_script(
    rows: Vec<JsonRow>,
    columns: Vec<Column<JsonRow>>,
    config: TableConfig,
    events: &[TableEvent<RowId>],
) -> Result<ScriptRun, GridError> {
    let notifications: Rc<RefCell<Vec<Vec<JsonRow>>>> = Rc::default();
    let sink = Rc::clone(&notifications);

    let mut table = TableState::new(columns, config)?
        .with_rows(rows)?
        .with_observer(move |selected: &[JsonRow]| sink.borrow_mut().push(selected.to_vec()));

    let mut changed = 0;
    for event in events {
        if table.handle(event.clone())?.is_changed() {
            changed += 1;
        }
    }
    info!(events = events.len(), changed, "Replayed event script");

    let notifications = notifications.take();
    Ok(ScriptRun {
        table,
        notifications,
    })
}

/// Serialize the table's derived view as JSON.
///
/// # Errors
///
/// Propagates `serde_json` serialization failures.
pub fn render_view(table: &TableState<JsonRow>, compact: bool) -> Result<String, serde_json::Error> {
    let view = table.view();
    if compact {
        serde_json::to_string(&view)
    } else {
        serde_json::to_string_pretty(&view)
    }
}
