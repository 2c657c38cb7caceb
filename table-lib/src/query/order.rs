//! Sort direction and sort specification.

use std::cmp::Ordering;
use std::fmt;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Returns `+1` for ascending and `-1` for descending.
    pub fn sign(self) -> i8 {
        match self {
            Direction::Asc => 1,
            Direction::Desc => -1,
        }
    }

    /// Applies the direction to an ascending comparison result.
    ///
    /// `Equal` stays `Equal`, which keeps stable sorts stable in both
    /// directions.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// Returns the wire name (`asc` / `desc`).
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active sort column and direction.
///
/// `column` is `None` when the table has no sortable column. When it is set,
/// the table guarantees it names a sortable column.
///
/// # Example
///
/// ```
/// use table_lib::query::{Direction, SortSpec};
///
/// let spec = SortSpec::desc("price");
/// assert_eq!(spec.column(), Some("price"));
/// assert_eq!(spec.direction, Direction::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SortSpec {
    pub(crate) column: Option<String>,
    /// Sort direction.
    pub direction: Direction,
}

impl SortSpec {
    /// Creates a sort spec for a column.
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    /// Creates an ascending sort spec.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Asc)
    }

    /// Creates a descending sort spec.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Desc)
    }

    /// Creates a spec with no sort column.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Returns the sort column id, if any.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Returns `true` if this spec sorts by the given column.
    pub fn is_column(&self, id: &str) -> bool {
        self.column.as_deref() == Some(id)
    }
}
