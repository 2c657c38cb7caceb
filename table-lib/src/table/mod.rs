//! Sortable, remotely paginated table.
//!
//! [`SortableTable`] owns the row set and exposes intents (`load`,
//! `request_sort`, `toggle_sort`, `request_more`, `dispose`) plus
//! [`SortableTable::derive_view`] for the host. Locks are only held for the
//! synchronous parts of an intent; the only suspension point is the fetch.

mod pagination;
mod state;
mod view;

pub use pagination::LoadOutcome;
pub use view::*;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use crate::config::SortMode;
use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::error::FetchError;
use crate::error::TableError;
use crate::model::Column;
use crate::model::Row;
use crate::query::Direction;
use crate::query::RowQuery;
use crate::query::SortSpec;
use crate::sort::Collation;
use crate::sort::sort_rows;
use crate::source::RowSource;

use pagination::LoadingGuard;
use pagination::Ticket;
use state::TableState;

/// What a sort intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOutcome {
    /// The column is unknown or not sortable. Nothing changed.
    Ignored,
    /// Loaded rows were re-ordered in place.
    Sorted,
    /// Freshly sorted rows were requested from the source.
    Fetched(LoadOutcome),
    /// The table has been disposed.
    Disposed,
}

struct TableInner<S> {
    columns: Vec<Column>,
    source: S,
    config: TableConfig,
    collation: Collation,
    state: RwLock<TableState>,
    view: Mutex<ViewCache>,
}

/// A sortable table that loads its rows page by page.
///
/// Cheap to clone: clones share the same state, so one clone can be handed
/// to a scroll handler and another to a header click handler.
///
/// # Example
///
/// ```ignore
/// let table = SortableTable::new(columns, source, TableConfig::default())?;
///
/// table.load().await?;
///
/// // Header click
/// table.toggle_sort("price").await?;
///
/// // Bottom of the list became visible
/// match table.request_more().await? {
///     LoadOutcome::Busy => {}      // already loading
///     LoadOutcome::Exhausted => {} // nothing left
///     _ => {}
/// }
///
/// let view = table.derive_view();
/// ```
pub struct SortableTable<S> {
    inner: Arc<TableInner<S>>,
}

impl<S> Clone for SortableTable<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: RowSource> SortableTable<S> {
    /// Creates a table. No rows are fetched until [`load`](Self::load).
    pub fn new(columns: Vec<Column>, source: S, config: TableConfig) -> Result<Self, TableError> {
        let sort = config.validate(&columns)?;
        let collation = Collation::new(&config.locale);

        Ok(Self {
            inner: Arc::new(TableInner {
                columns,
                source,
                config,
                collation,
                state: RwLock::new(TableState::new(sort)),
                view: Mutex::new(ViewCache::default()),
            }),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, TableState> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TableState> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.inner.columns
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TableConfig {
        &self.inner.config
    }

    /// Returns the row source.
    pub fn source(&self) -> &S {
        &self.inner.source
    }

    /// Returns a copy of the rows in display order.
    pub fn rows(&self) -> Vec<Row> {
        self.read().rows.clone()
    }

    /// Returns the current sort spec.
    pub fn sort_spec(&self) -> SortSpec {
        self.read().sort.clone()
    }

    /// Returns the number of rows fetched since the last reset.
    pub fn loaded_count(&self) -> usize {
        self.read().loaded_count
    }

    /// Returns `true` while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.read().is_loading()
    }

    /// Returns `true` once a fetch came back empty with no rows loaded.
    pub fn is_empty(&self) -> bool {
        self.read().empty
    }

    /// Returns `true` once the source ran out of rows.
    pub fn is_exhausted(&self) -> bool {
        self.read().exhausted
    }

    /// Returns `true` after [`dispose`](Self::dispose).
    pub fn is_disposed(&self) -> bool {
        self.read().disposed
    }

    fn sortable_column(&self, id: &str) -> Option<&Column> {
        self.inner.columns.iter().find(|c| c.id == id && c.sortable)
    }

    // -------------------------------------------------------------------------
    // Intents
    // -------------------------------------------------------------------------

    /// Loads the first page with the current sort, replacing the rows.
    ///
    /// Supersedes any fetch in flight.
    pub async fn load(&self) -> Result<LoadOutcome, TableError> {
        let (ticket, query) = {
            let mut state = self.write();
            if state.disposed {
                return Ok(LoadOutcome::Disposed);
            }
            state.begin(0, self.inner.config.page_size, true)
        };

        self.run_fetch(ticket, query).await
    }

    /// Loads `page_size` rows starting at `offset`.
    ///
    /// Offset zero replaces the rows, any other offset appends. Refused with
    /// [`LoadOutcome::Busy`] while another fetch is in flight.
    pub async fn load_page(&self, offset: usize, page_size: usize) -> Result<LoadOutcome, TableError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize.into());
        }

        let (ticket, query) = {
            let mut state = self.write();
            if state.disposed {
                return Ok(LoadOutcome::Disposed);
            }
            if state.is_loading() {
                log::debug!("Page at offset {} refused, fetch in flight", offset);
                return Ok(LoadOutcome::Busy);
            }
            state.begin(offset, page_size, offset == 0)
        };

        self.run_fetch(ticket, query).await
    }

    /// Loads the next page after the rows already loaded.
    ///
    /// Call when the bottom of the rendered list becomes visible. Dropped
    /// while a fetch is in flight and once the source ran out of rows.
    pub async fn request_more(&self) -> Result<LoadOutcome, TableError> {
        let (ticket, query) = {
            let mut state = self.write();
            if state.disposed {
                return Ok(LoadOutcome::Disposed);
            }
            if state.is_loading() {
                log::debug!("More rows refused, fetch in flight");
                return Ok(LoadOutcome::Busy);
            }
            if state.exhausted {
                return Ok(LoadOutcome::Exhausted);
            }
            let offset = state.loaded_count;
            state.begin(offset, self.inner.config.page_size, offset == 0)
        };

        self.run_fetch(ticket, query).await
    }

    /// Sorts by a column.
    ///
    /// In local mode the loaded rows are re-ordered in place. In remote mode
    /// the rows are re-fetched from offset zero with the new sort and replaced
    /// once the fetch resolves; a later sort supersedes an earlier one still
    /// in flight. Unknown and non-sortable columns are ignored.
    pub async fn request_sort(&self, column_id: &str, direction: Direction) -> Result<SortOutcome, TableError> {
        let Some(column) = self.sortable_column(column_id) else {
            log::debug!("Ignoring sort on {:?}: unknown or not sortable", column_id);
            return Ok(SortOutcome::Ignored);
        };
        let spec = SortSpec::new(column.id.clone(), direction);

        match self.inner.config.sort_mode {
            SortMode::Local => {
                let mut state = self.write();
                if state.disposed {
                    return Ok(SortOutcome::Disposed);
                }
                state.set_sort(spec);
                self.sort_loaded(&mut state);
                Ok(SortOutcome::Sorted)
            }
            SortMode::Remote => {
                let (ticket, query) = {
                    let mut state = self.write();
                    if state.disposed {
                        return Ok(SortOutcome::Disposed);
                    }
                    state.set_sort(spec);
                    state.begin(0, self.inner.config.page_size, true)
                };

                Ok(SortOutcome::Fetched(self.run_fetch(ticket, query).await?))
            }
        }
    }

    /// Sorts by a column in the opposite direction of its header's order
    /// attribute.
    ///
    /// The attribute is the direction the column was last sorted in and
    /// ascending for a column never sorted, so the first click on a new
    /// column sorts descending and repeated clicks alternate. Each column
    /// keeps its own attribute while other columns are sorted.
    pub async fn toggle_sort(&self, column_id: &str) -> Result<SortOutcome, TableError> {
        let direction = self
            .read()
            .orders
            .get(column_id)
            .copied()
            .unwrap_or(Direction::Asc)
            .toggled();

        self.request_sort(column_id, direction).await
    }

    /// Clears the rows and makes the table inert.
    ///
    /// Fetches still in flight are discarded when they settle and every later
    /// intent is a no-op.
    pub fn dispose(&self) {
        self.write().dispose();
        self.inner
            .view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Returns a consistent snapshot of the table for rendering.
    ///
    /// Header and body are reused from the previous snapshot when their
    /// inputs have not changed.
    pub fn derive_view(&self) -> TableView {
        let state = self.read();
        let mut cache = self.inner.view.lock().unwrap_or_else(PoisonError::into_inner);

        let header = cache.header(
            &self.inner.columns,
            &state.sort,
            &state.orders,
            state.sort_revision,
        );
        let body = cache.body(&self.inner.columns, &state.rows, state.rows_revision);

        TableView {
            header,
            body,
            flags: DisplayFlags {
                show_loading_bar: state.is_loading(),
                show_empty_placeholder: state.empty && state.rows.is_empty(),
                has_more: !state.exhausted && !state.disposed,
            },
            header_revision: state.sort_revision,
            body_revision: state.rows_revision,
        }
    }

    // -------------------------------------------------------------------------
    // Fetching
    // -------------------------------------------------------------------------

    async fn run_fetch(&self, ticket: Ticket, query: RowQuery) -> Result<LoadOutcome, TableError> {
        let guard = LoadingGuard::new(&self.inner.state, ticket);
        log::trace!(
            "Fetching rows {}..{} sorted by {:?} {}",
            query.offset,
            query.end(),
            query.sort.column(),
            query.sort.direction
        );

        let result = self.fetch(&query).await;
        let local = self.inner.config.sort_mode == SortMode::Local;

        guard.finish(|state, ticket| match result {
            Ok(rows) => {
                let outcome = state.commit(ticket, rows, query.limit);
                // Rows come back in the order they were requested in; a local
                // sort issued meanwhile must still hold for the whole set.
                if local && matches!(outcome, LoadOutcome::Committed { .. }) && state.sort != query.sort {
                    log::debug!("Re-sorting rows fetched under {:?}", query.sort);
                    self.sort_loaded(state);
                }
                Ok(outcome)
            }
            Err(e) if state.is_current(ticket) => {
                log::warn!("Fetch at offset {} failed: {}", query.offset, e);
                Err(e.into())
            }
            Err(e) => {
                log::debug!("Ignoring failure of superseded fetch: {}", e);
                Ok(LoadOutcome::Stale)
            }
        })
    }

    /// Re-orders the loaded rows by the current sort spec.
    fn sort_loaded(&self, state: &mut TableState) {
        let Some(column) = state.sort.column().and_then(|id| self.sortable_column(id)) else {
            return;
        };
        sort_rows(&mut state.rows, column, state.sort.direction, &self.inner.collation);
        state.rows_revision += 1;
    }

    async fn fetch(&self, query: &RowQuery) -> Result<Vec<Row>, FetchError> {
        let fetch = self.inner.source.fetch_rows(query);
        match self.inner.config.fetch_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, fetch).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout(timeout)),
            },
            None => fetch.await,
        }
    }
}
