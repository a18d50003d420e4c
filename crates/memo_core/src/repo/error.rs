//! Error taxonomy shared by the memo store and query engine.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Schema could not be created or verified.
    StorageInit(DbError),
    /// A write unit failed and was rolled back.
    StorageWrite(rusqlite::Error),
    /// A read query failed. Never reported as an empty result.
    StorageRead(rusqlite::Error),
    /// A persisted row could not be decoded into a memo record.
    InvalidData(String),
}

impl StoreError {
    /// Stable code used in log events and by transport layers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StorageInit(_) => "storage_init_failed",
            Self::StorageWrite(_) => "storage_write_failed",
            Self::StorageRead(_) => "storage_read_failed",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageInit(err) => write!(f, "storage initialization failed: {err}"),
            Self::StorageWrite(err) => write!(f, "storage write failed: {err}"),
            Self::StorageRead(err) => write!(f, "storage read failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted memo data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageInit(err) => Some(err),
            Self::StorageWrite(err) => Some(err),
            Self::StorageRead(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::StorageInit(value)
    }
}
