//! Table configuration

use std::collections::HashSet;
use std::time::Duration;

use crate::error::ConfigError;
use crate::model::Column;
use crate::query::Direction;
use crate::query::SortSpec;

/// Rows requested per page when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 40;

/// Collation locale used for string columns when none is configured.
pub const DEFAULT_LOCALE: &str = "ru";

/// Where sorting happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Re-order the rows already loaded.
    Local,
    /// Ask the row source for freshly sorted rows from offset zero.
    #[default]
    Remote,
}

/// Configuration for a [`SortableTable`](crate::SortableTable).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use table_lib::{SortMode, SortSpec, TableConfig};
///
/// let config = TableConfig::default()
///     .with_page_size(30)
///     .with_sort_mode(SortMode::Local)
///     .with_initial_sort(SortSpec::desc("price"))
///     .with_fetch_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Rows requested per page.
    ///
    /// Default: 40
    pub page_size: usize,

    /// Whether sort intents re-order loaded rows or re-fetch.
    ///
    /// Default: `Remote`
    pub sort_mode: SortMode,

    /// Sort applied before the first load.
    ///
    /// Default: first sortable column, ascending
    pub initial_sort: Option<SortSpec>,

    /// BCP 47 locale used to collate string columns.
    ///
    /// Default: `ru`
    pub locale: String,

    /// Upper bound on a single fetch.
    ///
    /// Default: none
    pub fetch_timeout: Option<Duration>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort_mode: SortMode::Remote,
            initial_sort: None,
            locale: DEFAULT_LOCALE.to_string(),
            fetch_timeout: None,
        }
    }
}

impl TableConfig {
    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the sort mode.
    pub fn with_sort_mode(mut self, sort_mode: SortMode) -> Self {
        self.sort_mode = sort_mode;
        self
    }

    /// Sets the initial sort.
    pub fn with_initial_sort(mut self, sort: SortSpec) -> Self {
        self.initial_sort = Some(sort);
        self
    }

    /// Sets the collation locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Sets the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Checks the config against the table's columns and returns the sort
    /// the table starts with.
    pub fn validate(&self, columns: &[Column]) -> Result<SortSpec, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in columns {
            if !seen.insert(column.id.as_str()) {
                return Err(ConfigError::DuplicateColumn(column.id.clone()));
            }
        }

        match &self.initial_sort {
            Some(sort) => {
                if let Some(id) = sort.column() {
                    let column = columns
                        .iter()
                        .find(|c| c.id == id)
                        .ok_or_else(|| ConfigError::UnknownColumn(id.to_string()))?;
                    if !column.sortable {
                        return Err(ConfigError::NotSortable(id.to_string()));
                    }
                }
                Ok(sort.clone())
            }
            None => Ok(columns
                .iter()
                .find(|c| c.sortable)
                .map(|c| SortSpec::new(c.id.clone(), Direction::Asc))
                .unwrap_or_default()),
        }
    }
}
