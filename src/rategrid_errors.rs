use thiserror::Error;

/// Failure modes of a one-time table initialization.
///
/// A `LazyTable` caches the *first* outcome of its loader, success or failure,
/// and replays it to every subsequent caller. The error type is therefore
/// `Clone`: the same value is handed out many times without re-running the
/// loader.
///
/// See also
/// ------------
/// * [`LazyTable::get_or_init`](crate::lazy_table::LazyTable::get_or_init) – Where these errors are cached.
/// * [`TextTableLoader`](crate::loader::TextTableLoader) – The producer of most of these errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("Table source not found at: {0}")]
    NotFound(String),

    #[error("Malformed table data: {0}")]
    MalformedData(String),

    #[error("Table allocation failed: {0}")]
    AllocationFailure(String),
}

/// Configuration errors, detected eagerly before any I/O is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid grid specification: {0}")]
    InvalidGridSpec(String),
}
