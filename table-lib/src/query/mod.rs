//! Sort and range types shared by the table and its row sources.
//!
//! - [`SortSpec`] - The active sort column and direction
//! - [`RowQuery`] - A range-bounded fetch request

mod order;
mod range;

pub use order::Direction;
pub use order::SortSpec;
pub use range::RowQuery;
