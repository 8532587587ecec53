//! The table state engine.
//!
//! [`TableState`] owns the three pieces of mutable state (sort, selection,
//! current page) together with the caller's rows and columns. Each event is
//! handled to completion before the next; everything the rendering layer sees
//! is derived afresh by [`TableState::view`].

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, warn};

use crate::config::TableConfig;
use crate::model::{Column, GridError, Row};
use crate::view_state::TableView;

use super::event::{EventOutcome, TableEvent};
use super::pagination::{self, PageResetPolicy, PageSize, Pagination};
use super::selection::{self, Selection, SelectionMode};
use super::sort::{self, SortConfig};

// ===== Observer =====

/// Receives the selected rows after every selection change.
///
/// Rows arrive in the order of the full row set, not in the order they were
/// selected and not in sort order. Any `FnMut(&[R])` closure is an observer.
pub trait SelectionObserver<R> {
    /// Called synchronously with the rows now selected.
    fn on_row_select(&mut self, rows: &[R]);
}

impl<R, F: FnMut(&[R])> SelectionObserver<R> for F {
    fn on_row_select(&mut self, rows: &[R]) {
        self(rows)
    }
}

// ===== TableState =====

/// Sort, selection and pagination state for one table.
///
/// # Examples
///
/// ```
/// use gridstate::config::TableConfig;
/// use gridstate::model::{CellValue, Column, Row};
/// use gridstate::state::{TableEvent, TableState};
///
/// #[derive(Clone, Debug)]
/// struct Person { id: u32, age: u32 }
///
/// impl Row for Person {
///     type Id = u32;
///     fn id(&self) -> u32 { self.id }
/// }
///
/// let columns = vec![Column::new("age", "Age", |p: &Person| CellValue::from(p.age)).sortable()];
/// let mut table = TableState::new(columns, TableConfig::default()).unwrap();
/// table
///     .set_rows(vec![Person { id: 1, age: 30 }, Person { id: 2, age: 25 }, Person { id: 3, age: 35 }])
///     .unwrap();
///
/// table.handle(TableEvent::HeaderActivated("age".into())).unwrap();
/// let order: Vec<u32> = table.view().page_slice.iter().map(|p| p.id).collect();
/// assert_eq!(order, vec![2, 1, 3]);
/// ```
pub struct TableState<R: Row> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    config: TableConfig,
    sort: Option<SortConfig>,
    selection: Selection<R::Id>,
    pagination: Pagination,
    observer: Option<Box<dyn SelectionObserver<R>>>,
}

impl<R: Row> TableState<R> {
    /// Create an empty table: no sort, no selection, page 1.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DuplicateColumnKey`] if two columns share a key.
    pub fn new(columns: Vec<Column<R>>, config: TableConfig) -> Result<Self, GridError> {
        let mut keys = HashSet::new();
        if let Some(column) = columns.iter().find(|column| !keys.insert(column.key())) {
            return Err(GridError::DuplicateColumnKey {
                key: column.key().to_string(),
            });
        }

        let pagination = Pagination::new(config.page_size);
        Ok(Self {
            columns,
            rows: Vec::new(),
            config,
            sort: None,
            selection: Selection::new(),
            pagination,
            observer: None,
        })
    }

    /// Builder form of [`set_rows`](Self::set_rows).
    pub fn with_rows(mut self, rows: Vec<R>) -> Result<Self, GridError> {
        self.set_rows(rows)?;
        Ok(self)
    }

    /// Attach the selection observer.
    pub fn with_observer(mut self, observer: impl SelectionObserver<R> + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Replace the selection observer.
    pub fn set_observer(&mut self, observer: impl SelectionObserver<R> + 'static) {
        self.observer = Some(Box::new(observer));
    }

    // ===== Accessors =====

    /// Column descriptors.
    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// All rows in caller order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Table configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Active sort, if any.
    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    /// Selected ids.
    pub fn selection(&self) -> &Selection<R::Id> {
        &self.selection
    }

    /// Current page (1-based). Always within `[1, total_pages]`.
    pub fn current_page(&self) -> usize {
        self.pagination.current()
    }

    /// Rows per page.
    pub fn page_size(&self) -> PageSize {
        self.pagination.page_size()
    }

    /// Total number of pages for the current rows.
    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.rows.len(), self.pagination.page_size())
    }

    /// Whether the table is loading.
    pub fn is_loading(&self) -> bool {
        self.config.loading
    }

    /// Enter or leave the loading state. While loading, [`view`](Self::view)
    /// skips derivation.
    pub fn set_loading(&mut self, loading: bool) {
        if self.config.loading != loading {
            debug!(loading, "Loading state changed");
        }
        self.config.loading = loading;
    }

    // ===== Rows =====

    /// Replace the rows.
    ///
    /// In order:
    /// 1. ids are checked for uniqueness (state is untouched on failure)
    /// 2. the current page is clamped into the new page range
    /// 3. if the row count changed and the policy is
    ///    [`PageResetPolicy::ResetToFirst`], the page goes back to 1
    /// 4. selected ids no longer present are dropped; the observer hears about it
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DuplicateRowId`] if two rows share an id.
    pub fn set_rows(&mut self, rows: Vec<R>) -> Result<(), GridError> {
        let mut ids = HashSet::with_capacity(rows.len());
        for row in &rows {
            let id = row.id();
            if ids.contains(&id) {
                warn!(id = %id, "Rejected rows with duplicate id");
                return Err(GridError::DuplicateRowId { id: id.to_string() });
            }
            ids.insert(id);
        }

        let previous_len = self.rows.len();
        self.rows = rows;

        let total = self.total_pages();
        let before = self.pagination.current();
        if self.pagination.clamp(total) {
            debug!(
                from = before,
                to = self.pagination.current(),
                total_pages = total,
                "Current page clamped after rows shrank"
            );
        }
        if previous_len != self.rows.len()
            && self.config.page_reset == PageResetPolicy::ResetToFirst
            && self.pagination.first()
        {
            debug!(
                previous_len,
                len = self.rows.len(),
                "Row count changed; back to page 1"
            );
        }

        if self.selection.retain(|id| ids.contains(id)) {
            debug!(
                remaining = self.selection.len(),
                "Dropped selected ids missing from new rows"
            );
            self.notify_selection();
        }
        Ok(())
    }

    // ===== Events =====

    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnknownRowId`] when a row activation names an id
    /// that is not in the rows; the selection is left unchanged.
    pub fn handle(&mut self, event: TableEvent<R::Id>) -> Result<EventOutcome, GridError> {
        let outcome = match event {
            TableEvent::HeaderActivated(key) => self.activate_header(&key),
            TableEvent::RowActivated(id) => self.activate_row(&id)?,
            TableEvent::SelectAllActivated => self.activate_select_all(),
            TableEvent::NextPage => {
                let total = self.total_pages();
                EventOutcome::from_changed(self.pagination.next(total))
            }
            TableEvent::PrevPage => {
                let total = self.total_pages();
                EventOutcome::from_changed(self.pagination.prev(total))
            }
            TableEvent::GoToPage(page) => {
                let total = self.total_pages();
                EventOutcome::from_changed(self.pagination.go_to(page, total))
            }
            TableEvent::FirstPage => EventOutcome::from_changed(self.pagination.first()),
            TableEvent::LastPage => {
                let total = self.total_pages();
                EventOutcome::from_changed(self.pagination.last(total))
            }
            TableEvent::ClearSort => EventOutcome::from_changed(self.sort.take().is_some()),
            TableEvent::ClearSelection => self.clear_selection(),
        };

        debug!(
            outcome = ?outcome,
            page = self.pagination.current(),
            selected = self.selection.len(),
            sort = ?self.sort,
            "Handled table event"
        );
        Ok(outcome)
    }

    fn activate_header(&mut self, key: &str) -> EventOutcome {
        let next = sort::header_transition(self.sort.as_ref(), &self.columns, key);
        if next == self.sort {
            debug!(key, "Header activation ignored (not a sortable column)");
            return EventOutcome::Unchanged;
        }
        self.sort = next;
        EventOutcome::Changed
    }

    fn activate_row(&mut self, id: &R::Id) -> Result<EventOutcome, GridError> {
        if !self.config.selectable {
            return Ok(EventOutcome::Unchanged);
        }
        if !self.rows.iter().any(|row| row.id() == *id) {
            warn!(id = %id, "Row activation for unknown id");
            return Err(GridError::UnknownRowId { id: id.to_string() });
        }

        self.selection = selection::toggle_row(&self.selection, id, self.config.selection_mode);
        self.notify_selection();
        Ok(EventOutcome::Changed)
    }

    fn activate_select_all(&mut self) -> EventOutcome {
        if !self.config.selectable {
            return EventOutcome::Unchanged;
        }
        if self.config.selection_mode == SelectionMode::Single {
            return EventOutcome::Unchanged;
        }

        let all_ids: Vec<R::Id> = self.rows.iter().map(|row| row.id()).collect();
        let next = selection::toggle_all(&self.selection, &all_ids, self.config.selection_mode);
        let changed = next != self.selection;
        self.selection = next;
        self.notify_selection();
        EventOutcome::from_changed(changed)
    }

    fn clear_selection(&mut self) -> EventOutcome {
        if self.selection.is_empty() {
            return EventOutcome::Unchanged;
        }
        self.selection = Selection::new();
        self.notify_selection();
        EventOutcome::Changed
    }

    fn notify_selection(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            let rows = selection::materialize(&self.rows, &self.selection);
            observer.on_row_select(&rows);
        }
    }

    // ===== Derived state =====

    /// All rows in the active sort order.
    pub fn sorted_rows(&self) -> Vec<&R> {
        sort::apply_sort(&self.rows, &self.columns, self.sort.as_ref())
    }

    /// The selected rows, in caller order.
    pub fn selected_rows(&self) -> Vec<R> {
        selection::materialize(&self.rows, &self.selection)
    }

    /// Derive the render model: sorted, then paginated, plus selection.
    pub fn view(&self) -> TableView<'_, R> {
        TableView::derive(self)
    }
}

impl<R: Row + fmt::Debug> fmt::Debug for TableState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableState")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("config", &self.config)
            .field("sort", &self.sort)
            .field("selection", &self.selection)
            .field("pagination", &self.pagination)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
