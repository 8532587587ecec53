//! Column descriptors.
//!
//! A column maps a row to a [`CellValue`] through its accessor and decides how
//! that value is shown. Columns are immutable once handed to the engine.

use crate::model::row::{JsonRow, ID_FIELD};
use crate::model::value::CellValue;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Extracts a cell value from a row.
pub type Accessor<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// Produces display text for a cell from the row and its extracted value.
pub type CellRenderer<R> = Arc<dyn Fn(&R, &CellValue) -> String + Send + Sync>;

/// How a column's cells are displayed.
pub enum CellDisplay<R> {
    /// The value's own display text.
    Default,
    /// A caller-supplied renderer.
    Custom(CellRenderer<R>),
}

impl<R> Clone for CellDisplay<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Default => Self::Default,
            Self::Custom(renderer) => Self::Custom(Arc::clone(renderer)),
        }
    }
}

/// A table column.
///
/// # Examples
///
/// ```
/// use gridstate::model::{CellValue, Column};
///
/// #[derive(Clone)]
/// struct User { age: u32 }
///
/// let age = Column::new("age", "Age", |u: &User| CellValue::from(u.age))
///     .sortable()
///     .width(6);
/// assert!(age.is_sortable());
/// assert_eq!(age.display(&User { age: 30 }), "30");
/// ```
pub struct Column<R> {
    key: String,
    title: String,
    accessor: Accessor<R>,
    sortable: bool,
    display: CellDisplay<R>,
    width: Option<u16>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            accessor: Arc::clone(&self.accessor),
            sortable: self.sortable,
            display: self.display.clone(),
            width: self.width,
        }
    }
}

impl<R> Column<R> {
    /// Create a non-sortable column with default display.
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        accessor: impl Fn(&R) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            accessor: Arc::new(accessor),
            sortable: false,
            display: CellDisplay::Default,
            width: None,
        }
    }

    /// Allow sorting by this column.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the width hint for the rendering layer.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Display cells with a custom renderer instead of the value's text.
    pub fn render_with(
        mut self,
        renderer: impl Fn(&R, &CellValue) -> String + Send + Sync + 'static,
    ) -> Self {
        self.display = CellDisplay::Custom(Arc::new(renderer));
        self
    }

    /// Unique column key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Header label.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether header activation sorts by this column.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Width hint, if any.
    pub fn width_hint(&self) -> Option<u16> {
        self.width
    }

    /// How cells of this column are displayed.
    pub fn cell_display(&self) -> &CellDisplay<R> {
        &self.display
    }

    /// Extract this column's value from a row.
    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }

    /// Display text of this column's cell for a row.
    pub fn display(&self, row: &R) -> String {
        let value = self.value(row);
        match &self.display {
            CellDisplay::Default => value.display(),
            CellDisplay::Custom(render) => render(row, &value),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("custom_display", &matches!(self.display, CellDisplay::Custom(_)))
            .field("width", &self.width)
            .finish()
    }
}

impl<R> Serialize for Column<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Column", 4)?;
        state.serialize_field("key", &self.key)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("sortable", &self.sortable)?;
        state.serialize_field("width", &self.width)?;
        state.end()
    }
}

// ===== Declarative columns for JSON rows =====

/// Column description as written in a config file.
///
/// ```toml
/// [[columns]]
/// key = "city"
/// title = "City"
/// field = "address.city"
/// sortable = true
/// width = 12
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    /// Unique column key.
    pub key: String,

    /// Header label. Defaults to the key.
    #[serde(default)]
    pub title: Option<String>,

    /// Field name or dotted path in the row. Defaults to the key.
    #[serde(default)]
    pub field: Option<String>,

    /// Whether the column is sortable.
    #[serde(default = "default_sortable")]
    pub sortable: bool,

    /// Width hint for the rendering layer.
    #[serde(default)]
    pub width: Option<u16>,
}

fn default_sortable() -> bool {
    true
}

impl ColumnSpec {
    /// A sortable column reading the field of the same name.
    pub fn for_field(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: None,
            field: None,
            sortable: true,
            width: None,
        }
    }

    /// One sortable column per top-level field of the row, `id` excluded.
    pub fn infer(row: &JsonRow) -> Vec<Self> {
        row.keys()
            .filter(|key| *key != ID_FIELD)
            .map(Self::for_field)
            .collect()
    }

    /// Build the column, reading values by field path from [`JsonRow`]s.
    pub fn to_column(&self) -> Column<JsonRow> {
        let field = self.field.clone().unwrap_or_else(|| self.key.clone());
        let title = self.title.clone().unwrap_or_else(|| self.key.clone());
        let mut column = Column::new(self.key.clone(), title, move |row: &JsonRow| {
            row.get(&field).map_or(CellValue::Null, CellValue::from_json)
        });
        column.sortable = self.sortable;
        column.width = self.width;
        column
    }
}
