//! Range-bounded row query.

use super::SortSpec;

/// A request for one page of rows.
///
/// The source must return rows ordered by `sort`, starting at `offset`,
/// and at most `limit` of them. Fewer than `limit` rows signals the end of
/// the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowQuery {
    /// Sort order the rows must come back in.
    pub sort: SortSpec,
    /// Index of the first row to return.
    pub offset: usize,
    /// Maximum number of rows to return.
    pub limit: usize,
}

impl RowQuery {
    /// Creates a new query.
    pub fn new(sort: SortSpec, offset: usize, limit: usize) -> Self {
        Self {
            sort,
            offset,
            limit,
        }
    }

    /// Returns the exclusive end index of the range (`offset + limit`).
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.limit)
    }
}
