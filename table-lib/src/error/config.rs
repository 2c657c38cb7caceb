//! Configuration error types

/// Errors raised when a table is constructed with an inconsistent setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Page size must be positive.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// Two columns share the same id.
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),

    /// The initial sort names a column the table does not have.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// The initial sort names a column that is not sortable.
    #[error("column is not sortable: {0}")]
    NotSortable(String),
}
