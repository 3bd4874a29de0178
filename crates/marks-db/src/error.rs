use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was empty or absent. Rejected requests never reach
    /// the table, so an empty title or url is never stored.
    #[error("{0} must not be empty")]
    Validation(&'static str),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("DB lock poisoned")]
    Poisoned,
}
