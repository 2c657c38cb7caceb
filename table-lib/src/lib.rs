//! Sortable, incrementally loaded table engine
//!
//! Keeps a row set, its sort order and its pagination offset consistent while
//! rows arrive page by page from an unreliable [`RowSource`]. Rendering is left
//! to the host: [`SortableTable::derive_view`] returns an immutable snapshot the
//! host can patch into whatever view technology it uses.
//!
//! # Example
//!
//! ```ignore
//! use table_lib::{Column, SortableTable, TableConfig};
//! use table_lib::source::HttpRowSource;
//!
//! let columns = vec![
//!     Column::string("title", "Name").sortable(),
//!     Column::number("price", "Price").sortable(),
//! ];
//! let source = HttpRowSource::new("https://course-js.javascript.ru", "api/rest/products")?;
//! let table = SortableTable::new(columns, source, TableConfig::default())?;
//!
//! table.load().await?;
//! table.toggle_sort("price").await?;
//! table.request_more().await?;
//!
//! let view = table.derive_view();
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod sort;
pub mod source;
pub mod table;

pub use config::*;
pub use error::*;
pub use model::*;
pub use query::*;
pub use source::RowSource;
pub use table::*;
