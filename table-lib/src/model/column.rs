//! Column descriptors

use std::fmt;
use std::sync::Arc;

use super::Value;

/// How a column's values compare when the table sorts locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortType {
    /// Numeric comparison.
    Number,
    /// Locale-aware string comparison.
    #[default]
    String,
}

/// Custom cell renderer: turns a cell value into markup.
pub type Renderer = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Describes one table column.
///
/// Columns are immutable once the table is constructed.
///
/// # Example
///
/// ```
/// use table_lib::model::{Column, SortType};
///
/// let columns = vec![
///     Column::string("images", "Image")
///         .renderer(|v| format!("<img src=\"{}\">", v)),
///     Column::string("title", "Name").sortable(),
///     Column::number("quantity", "Quantity").sortable(),
/// ];
///
/// assert_eq!(columns[2].sort_type, SortType::Number);
/// ```
#[derive(Clone)]
pub struct Column {
    /// Unique key into a row.
    pub id: String,
    /// Header text.
    pub title: String,
    /// Whether the column can be sorted.
    pub sortable: bool,
    /// Comparison used for local sorting.
    pub sort_type: SortType,
    /// Optional cell renderer. Cells fall back to the value's text when absent.
    pub renderer: Option<Renderer>,
}

impl Column {
    /// Creates a non-sortable column with the given id, title and sort type.
    pub fn new(id: impl Into<String>, title: impl Into<String>, sort_type: SortType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sortable: false,
            sort_type,
            renderer: None,
        }
    }

    /// Creates a string column.
    pub fn string(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id, title, SortType::String)
    }

    /// Creates a number column.
    pub fn number(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id, title, SortType::Number)
    }

    /// Marks the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets a custom cell renderer.
    ///
    /// Renderers run inside [`SortableTable::derive_view`] while the table's
    /// state lock is held, and only when the body changed since the last
    /// snapshot. A renderer must not call back into the table: any intent or
    /// accessor on the same table from inside it deadlocks.
    ///
    /// [`SortableTable::derive_view`]: crate::table::SortableTable::derive_view
    pub fn renderer<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(render));
        self
    }

    /// Renders a cell value with the column's renderer, or as plain text.
    pub fn render(&self, value: &Value) -> String {
        match &self.renderer {
            Some(render) => render(value),
            None => value.to_string(),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("sort_type", &self.sort_type)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}
