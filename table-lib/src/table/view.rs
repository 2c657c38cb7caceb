//! View synchronizer.
//!
//! Maps table state to an immutable, render-ready snapshot. The header
//! depends only on the columns and the sort spec, the body only on the rows,
//! so each part is cached against its own revision and rebuilt only when its
//! inputs change.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::Column;
use crate::model::Row;
use crate::query::Direction;
use crate::query::SortSpec;

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column id.
    pub id: String,
    /// Header text.
    pub title: String,
    /// Whether clicking the header may sort by this column.
    pub sortable: bool,
    /// Sort indicator, set only on the column the table is sorted by.
    pub indicator: Option<Direction>,
    /// Order attribute: the direction this column was last sorted in,
    /// ascending if it never was. A header click sorts the opposite way.
    pub order: Direction,
}

impl HeaderCell {
    /// Returns `true` if the table is sorted by this column.
    pub fn is_sorted(&self) -> bool {
        self.indicator.is_some()
    }
}

/// One body row, one rendered cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRow {
    /// Rendered cells in column order.
    pub cells: Vec<String>,
}

/// Which auxiliary states the host should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayFlags {
    /// A fetch is in flight.
    pub show_loading_bar: bool,
    /// A fetch returned nothing and there are no rows.
    pub show_empty_placeholder: bool,
    /// More pages may be available.
    pub has_more: bool,
}

/// Consistent snapshot of a table.
#[derive(Debug, Clone)]
pub struct TableView {
    /// Header cells, one per column.
    pub header: Arc<[HeaderCell]>,
    /// Body rows in display order.
    pub body: Arc<[BodyRow]>,
    /// Loading / empty / more flags.
    pub flags: DisplayFlags,
    /// Changes whenever the header changes.
    pub header_revision: u64,
    /// Changes whenever the body changes.
    pub body_revision: u64,
}

/// Parts of a view that differ from an earlier snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewChanges {
    pub header: bool,
    pub body: bool,
    pub flags: bool,
}

impl ViewChanges {
    /// Returns `true` if anything changed.
    pub fn any(&self) -> bool {
        self.header || self.body || self.flags
    }
}

impl TableView {
    /// Compares with an earlier snapshot of the same table, so the host can
    /// patch only the parts that changed.
    pub fn changes_since(&self, previous: &TableView) -> ViewChanges {
        ViewChanges {
            header: self.header_revision != previous.header_revision,
            body: self.body_revision != previous.body_revision,
            flags: self.flags != previous.flags,
        }
    }
}

/// Builds header cells.
///
/// `orders` holds the last direction of every column sorted so far; columns
/// missing from it get an ascending order attribute.
pub fn derive_header(
    columns: &[Column],
    sort: &SortSpec,
    orders: &HashMap<String, Direction>,
) -> Vec<HeaderCell> {
    columns
        .iter()
        .map(|column| {
            let indicator = sort.is_column(&column.id).then_some(sort.direction);
            HeaderCell {
                id: column.id.clone(),
                title: column.title.clone(),
                sortable: column.sortable,
                indicator,
                order: indicator
                    .or_else(|| orders.get(&column.id).copied())
                    .unwrap_or(Direction::Asc),
            }
        })
        .collect()
}

/// Builds body rows.
pub fn derive_body(columns: &[Column], rows: &[Row]) -> Vec<BodyRow> {
    rows.iter()
        .map(|row| BodyRow {
            cells: columns
                .iter()
                .map(|column| column.render(row.value(&column.id)))
                .collect(),
        })
        .collect()
}

/// Last derived header and body with the revisions they were built from.
#[derive(Debug, Default)]
pub(super) struct ViewCache {
    header: Option<(u64, Arc<[HeaderCell]>)>,
    body: Option<(u64, Arc<[BodyRow]>)>,
}

impl ViewCache {
    pub fn header(
        &mut self,
        columns: &[Column],
        sort: &SortSpec,
        orders: &HashMap<String, Direction>,
        revision: u64,
    ) -> Arc<[HeaderCell]> {
        if let Some((cached, header)) = &self.header
            && *cached == revision
        {
            return Arc::clone(header);
        }
        let header: Arc<[HeaderCell]> = derive_header(columns, sort, orders).into();
        self.header = Some((revision, Arc::clone(&header)));
        header
    }

    pub fn body(&mut self, columns: &[Column], rows: &[Row], revision: u64) -> Arc<[BodyRow]> {
        if let Some((cached, body)) = &self.body
            && *cached == revision
        {
            return Arc::clone(body);
        }
        let body: Arc<[BodyRow]> = derive_body(columns, rows).into();
        self.body = Some((revision, Arc::clone(&body)));
        body
    }

    pub fn clear(&mut self) {
        self.header = None;
        self.body = None;
    }
}
