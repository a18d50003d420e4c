//! Explicit runtime configuration handed to the core by its entry point.
//!
//! # Responsibility
//! - Describe where memo storage lives (`StorageLocator`).
//! - Carry logging settings without reading environment or files.
//!
//! # Invariants
//! - Core never owns a process-global storage location; callers pass a
//!   locator into every handle acquisition.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

/// Location of the backing SQLite store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocator {
    /// Database file on disk. Created on first open.
    File(PathBuf),
    /// Private in-memory database; every acquisition sees a fresh store.
    InMemory,
}

impl StorageLocator {
    /// Builds a file locator.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    /// Short label used in log events.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::InMemory => "memory",
        }
    }
}

/// Process-level settings assembled by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub storage: StorageLocator,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<String>,
}

impl CoreConfig {
    /// Creates a config with the build-mode default log level and no log dir.
    pub fn new(storage: StorageLocator) -> Self {
        Self {
            storage,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<String>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, StorageLocator};
    use crate::logging::default_log_level;
    use std::path::PathBuf;

    #[test]
    fn new_config_uses_default_level_and_no_log_dir() {
        let config = CoreConfig::new(StorageLocator::InMemory);
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn file_locator_keeps_path_and_reports_mode() {
        let locator = StorageLocator::file("/tmp/memos.sqlite3");
        assert_eq!(
            locator,
            StorageLocator::File(PathBuf::from("/tmp/memos.sqlite3"))
        );
        assert_eq!(locator.mode(), "file");
        assert_eq!(StorageLocator::InMemory.mode(), "memory");
    }
}
