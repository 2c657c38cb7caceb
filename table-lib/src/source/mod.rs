//! Row sources
//!
//! A [`RowSource`] is the table's only view of where data comes from. The
//! table treats it as slow and unreliable: every call may fail, return fewer
//! rows than asked for, or return nothing at all.

mod http;
mod memory;

pub use http::*;
pub use memory::*;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::Row;
use crate::query::RowQuery;

/// Trait for row sources.
///
/// Implementations return rows ordered by `query.sort`, starting at
/// `query.offset`, at most `query.limit` of them.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use table_lib::{FetchError, Row, RowQuery, RowSource};
///
/// struct Fixed(Vec<Row>);
///
/// #[async_trait]
/// impl RowSource for Fixed {
///     async fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<Row>, FetchError> {
///         Ok(self.0.iter().skip(query.offset).take(query.limit).cloned().collect())
///     }
/// }
/// ```
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Fetches one page of rows.
    async fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<Row>, FetchError>;
}

#[async_trait]
impl<S: RowSource + ?Sized> RowSource for Arc<S> {
    async fn fetch_rows(&self, query: &RowQuery) -> Result<Vec<Row>, FetchError> {
        (**self).fetch_rows(query).await
    }
}
