//! Error types

mod config;
mod fetch;

pub use config::*;
pub use fetch::*;

/// Errors surfaced by table intents.
///
/// Fetch failures never poison the table: the loading state is released and
/// the rows stay as they were before the request.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The row source failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The table was configured inconsistently with its columns.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TableError {
    /// Returns the fetch error, if this is one.
    pub fn as_fetch(&self) -> Option<&FetchError> {
        match self {
            Self::Fetch(e) => Some(e),
            _ => None,
        }
    }

    /// Returns `true` if retrying the same intent may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_retryable(),
            Self::Config(_) => false,
        }
    }
}
