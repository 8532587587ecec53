//! Render model handed to the rendering layer.

use serde::Serialize;

use crate::model::{Column, Row};
use crate::state::pagination::{self, PageBounds};
use crate::state::selection::{self, SelectionMode};
use crate::state::sort::{self, SortConfig};
use crate::state::TableState;

/// Everything the rendering layer needs for one frame.
///
/// Derived from a [`TableState`] by sorting, then paginating. While the table
/// is loading no derivation happens: the page is empty, there is one page and
/// the table is not reported as empty.
#[derive(Debug, Serialize)]
#[serde(bound(serialize = "R: Serialize, R::Id: Serialize"))]
pub struct TableView<'a, R: Row> {
    /// Rows on the current page, in sort order.
    pub page_slice: Vec<&'a R>,
    /// Column descriptors.
    pub columns: &'a [Column<R>],
    /// Active sort.
    pub sort: Option<&'a SortConfig>,
    /// Selected ids in caller row order.
    pub selected_ids: Vec<R::Id>,
    /// Current page (1-based).
    pub current_page: usize,
    /// Total number of pages (at least 1).
    pub total_pages: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Total number of rows across all pages.
    pub total_rows: usize,
    /// Row positions shown on this page.
    pub page_bounds: PageBounds,
    /// Whether the table is loading.
    pub loading: bool,
    /// Whether there are no rows (never true while loading).
    pub is_empty: bool,
    /// Text for the empty state.
    pub empty_message: &'a str,
    /// Whether rows can be selected.
    pub selectable: bool,
    /// Selection mode.
    pub selection_mode: SelectionMode,
    /// Every row is selected (select-all control checked).
    pub all_selected: bool,
    /// Some rows are selected (select-all control mixed).
    pub partially_selected: bool,
}

impl<'a, R: Row> TableView<'a, R> {
    /// Derive the view from the engine's current state.
    pub fn derive(table: &'a TableState<R>) -> Self {
        let config = table.config();
        let page_size = table.page_size();
        let rows = table.rows();

        if config.loading {
            return Self {
                page_slice: Vec::new(),
                columns: table.columns(),
                sort: table.sort(),
                selected_ids: Vec::new(),
                current_page: 1,
                total_pages: 1,
                page_size: page_size.get(),
                total_rows: 0,
                page_bounds: PageBounds::compute(0, 1, page_size),
                loading: true,
                is_empty: false,
                empty_message: &config.empty_message,
                selectable: config.selectable,
                selection_mode: config.selection_mode,
                all_selected: false,
                partially_selected: false,
            };
        }

        let sorted = sort::apply_sort(rows, table.columns(), table.sort());
        let page = pagination::paginate(&sorted, table.current_page(), page_size);
        let selection = table.selection();

        Self {
            page_slice: page.slice.to_vec(),
            columns: table.columns(),
            sort: table.sort(),
            selected_ids: rows
                .iter()
                .map(|row| row.id())
                .filter(|id| selection.is_selected(id))
                .collect(),
            current_page: page.current_page,
            total_pages: page.total_pages,
            page_size: page_size.get(),
            total_rows: rows.len(),
            page_bounds: PageBounds::compute(rows.len(), page.current_page, page_size),
            loading: false,
            is_empty: rows.is_empty(),
            empty_message: &config.empty_message,
            selectable: config.selectable,
            selection_mode: config.selection_mode,
            all_selected: selection::is_all_selected(selection, rows.len()),
            partially_selected: selection::is_partially_selected(selection, rows.len()),
        }
    }

    /// Whether the row with `id` is selected.
    pub fn is_selected(&self, id: &R::Id) -> bool {
        self.selected_ids.contains(id)
    }

    /// Display text of every cell on the page, row by row.
    pub fn cell_texts(&self) -> Vec<Vec<String>> {
        self.page_slice
            .iter()
            .map(|row| self.columns.iter().map(|column| column.display(row)).collect())
            .collect()
    }
}
