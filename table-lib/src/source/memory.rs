//! In-memory row source

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;

use super::RowSource;
use crate::config::DEFAULT_LOCALE;
use crate::error::FetchError;
use crate::model::Column;
use crate::model::Row;
use crate::query::RowQuery;
use crate::sort::Collation;
use crate::sort::sort_rows;

/// Serves pages of a fixed row set the way a backend would.
///
/// Each fetch sorts a copy of the rows by the query's sort spec with the
/// same engine the table uses locally, then returns the requested range.
/// Useful for tables over static data and for exercising a table without a
/// network.
///
/// # Example
///
/// ```
/// use table_lib::model::{Column, Row};
/// use table_lib::source::MemoryRowSource;
///
/// let columns = vec![Column::number("n", "N").sortable()];
/// let rows = vec![Row::new().set("n", 5), Row::new().set("n", 2)];
/// let source = MemoryRowSource::new(columns, rows);
///
/// assert_eq!(source.len(), 2);
/// ```
#[derive(Debug)]
pub struct MemoryRowSource {
    columns: Vec<Column>,
    rows: Vec<Row>,
    collation: Collation,
    fetches: AtomicUsize,
}

impl MemoryRowSource {
    /// Creates a source over `rows`, sorting with the column definitions.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            collation: Collation::new(DEFAULT_LOCALE),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Sets the collation locale for string columns.
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.collation = Collation::new(locale);
        self
    }

    /// Returns the total number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the source holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns how many fetches have been served.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RowSource for MemoryRowSource {
    async fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<Row>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let mut rows = self.rows.clone();
        let column = query
            .sort
            .column()
            .and_then(|id| self.columns.iter().find(|c| c.id == id && c.sortable));
        if let Some(column) = column {
            sort_rows(&mut rows, column, query.sort.direction, &self.collation);
        }

        Ok(rows
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }
}
