//! Pagination and fetch control.
//!
//! At most one fetch is admitted per intent, every fetch carries a
//! [`Ticket`], and the loading state is released on every exit path by
//! [`LoadingGuard`], including when the fetching future is dropped.

use std::sync::PoisonError;
use std::sync::RwLock;

use super::state::TableState;

/// Tag attached to every issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Ticket {
    pub id: u64,
    pub generation: u64,
    pub offset: usize,
}

/// What a load intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Rows were committed to the table.
    Committed {
        /// Number of rows received.
        received: usize,
        /// `true` if the rows were appended, `false` if they replaced the
        /// previous rows.
        appended: bool,
    },
    /// The source returned no rows. Existing rows are untouched.
    Empty,
    /// Refused: another fetch is already in flight.
    Busy,
    /// Refused: the last page was shorter than the page size.
    Exhausted,
    /// The response arrived after a newer intent superseded it and was
    /// discarded.
    Stale,
    /// The table has been disposed.
    Disposed,
}

impl LoadOutcome {
    /// Number of rows committed by this load.
    pub fn received(&self) -> usize {
        match self {
            LoadOutcome::Committed { received, .. } => *received,
            _ => 0,
        }
    }

    /// Returns `true` if the intent issued no fetch.
    pub fn was_refused(&self) -> bool {
        matches!(
            self,
            LoadOutcome::Busy | LoadOutcome::Exhausted | LoadOutcome::Disposed
        )
    }
}

/// Releases the loading state of one ticket when dropped.
pub(super) struct LoadingGuard<'a> {
    state: &'a RwLock<TableState>,
    ticket: Ticket,
    armed: bool,
}

impl<'a> LoadingGuard<'a> {
    pub fn new(state: &'a RwLock<TableState>, ticket: Ticket) -> Self {
        Self {
            state,
            ticket,
            armed: true,
        }
    }

    /// Applies the fetch result and releases the loading state under one
    /// lock, so no observer sees rows committed while still loading.
    pub fn finish<T>(mut self, apply: impl FnOnce(&mut TableState, &Ticket) -> T) -> T {
        self.armed = false;
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let result = apply(&mut state, &self.ticket);
        state.settle(&self.ticket);
        result
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            log::debug!("Fetch at offset {} abandoned", self.ticket.offset);
            self.state
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .settle(&self.ticket);
        }
    }
}
