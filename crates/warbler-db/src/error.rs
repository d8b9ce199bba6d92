use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A persistence constraint (uniqueness, NOT NULL, foreign key) was
    /// violated. Signup with a taken username or a missing required field
    /// surfaces as this variant.
    #[error("integrity error: {0}")]
    Integrity(String),

    /// A lookup by id found no row.
    #[error("record not found")]
    NotFound,

    /// The requesting user does not own the record it tried to mutate.
    #[error("operation forbidden")]
    Forbidden,

    /// The connection mutex was poisoned by a panicking thread.
    #[error("database lock poisoned")]
    LockPoisoned,

    /// Any other SQLite error.
    #[error("database error: {0}")]
    Sqlite(rusqlite::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(err, msg)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Integrity(
                    msg.clone().unwrap_or_else(|| "constraint violation".into()),
                )
            }
            _ => StoreError::Sqlite(e),
        }
    }
}
