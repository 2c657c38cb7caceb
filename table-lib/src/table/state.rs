//! Table state.

use std::collections::HashMap;

use crate::model::Row;
use crate::query::Direction;
use crate::query::RowQuery;
use crate::query::SortSpec;

use super::pagination::LoadOutcome;
use super::pagination::Ticket;

/// Mutable core of a table.
///
/// Only the sort engine and the pagination controller mutate it, always
/// under the table's lock and never across a fetch.
#[derive(Debug, Default)]
pub(super) struct TableState {
    /// Rows in display order.
    pub rows: Vec<Row>,
    /// Current sort spec.
    pub sort: SortSpec,
    /// Last direction each column was sorted in.
    pub orders: HashMap<String, Direction>,
    /// Rows fetched since the last reset.
    pub loaded_count: usize,
    /// Latest issued fetch that has not settled. Loading while set.
    pub pending: Option<Ticket>,
    /// Set once a fetch returned nothing and there are no rows to show.
    pub empty: bool,
    /// Set once a page came back shorter than requested.
    pub exhausted: bool,
    /// Bumped on every reset; tickets from older generations are stale.
    pub generation: u64,
    /// Next ticket id.
    pub next_ticket: u64,
    /// Set by `dispose`; the table ignores every intent afterwards.
    pub disposed: bool,
    /// Bumped whenever `rows` changes.
    pub rows_revision: u64,
    /// Bumped whenever `sort` changes.
    pub sort_revision: u64,
}

impl TableState {
    pub fn new(sort: SortSpec) -> Self {
        let mut state = Self::default();
        state.set_sort(sort);
        state
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Updates the sort spec and remembers its direction for the column.
    pub fn set_sort(&mut self, sort: SortSpec) {
        if let Some(column) = sort.column() {
            self.orders.insert(column.to_string(), sort.direction);
        }
        if self.sort != sort {
            self.sort = sort;
            self.sort_revision += 1;
        }
    }

    /// Registers a new fetch and returns its ticket and query.
    ///
    /// A reset starts a new generation, so every fetch issued before it is
    /// stale and will be discarded when it settles.
    pub fn begin(&mut self, offset: usize, limit: usize, reset: bool) -> (Ticket, RowQuery) {
        if reset {
            self.generation += 1;
            self.exhausted = false;
        }

        let ticket = Ticket {
            id: self.next_ticket,
            generation: self.generation,
            offset,
        };
        self.next_ticket += 1;
        self.pending = Some(ticket);

        (ticket, RowQuery::new(self.sort.clone(), offset, limit))
    }

    /// Whether a ticket still belongs to the latest intent.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        !self.disposed && ticket.generation == self.generation
    }

    /// Releases the loading state if `ticket` is the latest fetch.
    pub fn settle(&mut self, ticket: &Ticket) {
        if self.pending.is_some_and(|p| p.id == ticket.id) {
            self.pending = None;
        }
    }

    /// Applies a successful fetch.
    pub fn commit(&mut self, ticket: &Ticket, rows: Vec<Row>, limit: usize) -> LoadOutcome {
        if !self.is_current(ticket) {
            log::debug!(
                "Discarding stale page at offset {} (generation {}, current {})",
                ticket.offset,
                ticket.generation,
                self.generation
            );
            return LoadOutcome::Stale;
        }

        let received = rows.len();
        if received < limit {
            self.exhausted = true;
        }

        if rows.is_empty() {
            if self.rows.is_empty() {
                self.empty = true;
            }
            return LoadOutcome::Empty;
        }

        let appended = ticket.offset > 0;
        if appended {
            self.rows.extend(rows);
            self.loaded_count += received;
        } else {
            self.rows = rows;
            self.loaded_count = received;
        }
        self.empty = false;
        self.rows_revision += 1;

        LoadOutcome::Committed { received, appended }
    }

    /// Clears rows and flags and makes every in-flight fetch stale.
    pub fn dispose(&mut self) {
        self.rows.clear();
        self.loaded_count = 0;
        self.pending = None;
        self.empty = false;
        self.exhausted = false;
        self.generation += 1;
        self.disposed = true;
        self.rows_revision += 1;
    }
}
