//! Memo/tag storage and query engine.
//! Transport layers call into this crate with plain values and get back
//! plain records or typed errors.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{CoreConfig, StorageLocator};
pub use db::{ensure_schema, open_db, open_db_file, open_db_in_memory, with_db, DbError};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::memo::{MemoId, MemoRecord, MemoValidationError, NewMemo, TagId};
pub use model::tags::parse_tag_list;
pub use repo::error::{StoreError, StoreResult};
pub use repo::memo_repo::{MemoRepository, SqliteMemoRepository};
pub use search::memo_query::{get_memo, list_all, search_by_keyword, search_by_tags};
pub use service::memo_service::{MemoService, MemoServiceError};

/// Minimal health-check API for transport layers.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
