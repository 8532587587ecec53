//! Domain model types (pure).
//!
//! Rows, columns and cell values. Nothing here holds table state.

pub mod column;
pub mod error;
pub mod row;
pub mod value;

// Re-export for convenience
pub use column::{Accessor, CellDisplay, CellRenderer, Column, ColumnSpec};
pub use error::{AppError, GridError, InputError, ParseError};
pub use row::{JsonRow, JsonRowRejection, Row, RowId};
pub use value::{compare_values, natural_cmp, CellValue};
