//! Table state engine (pure).
//!
//! Sort, selection and pagination are each a small pure module; [`TableState`]
//! ties them together and handles [`TableEvent`]s. Nothing here renders.

pub mod event;
pub mod pagination;
pub mod selection;
pub mod sort;
pub mod table;

pub use event::{EventOutcome, TableEvent};
pub use pagination::{
    paginate, total_pages, Page, PageBounds, PageResetPolicy, PageSize, Pagination,
};
pub use selection::{materialize, toggle_all, toggle_row, Selection, SelectionMode};
pub use sort::{apply_sort, header_transition, SortConfig, SortDirection};
pub use table::{SelectionObserver, TableState};
