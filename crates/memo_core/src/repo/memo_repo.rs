//! Memo repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create memos together with their tag links in one write unit.
//! - Delete memos together with their tag links in one write unit.
//! - Delegate read paths to the query engine.
//!
//! # Invariants
//! - A memo and its `memo_tags` rows become visible together or not at all.
//! - `memo_tags` rows are removed before the memo row they reference.
//! - Tag rows are never deleted; orphaned tags stay queryable by name.

use crate::db::{ensure_schema, write_unit};
use crate::model::memo::{MemoId, MemoRecord};
use crate::repo::error::{StoreError, StoreResult};
use crate::repo::tag_repo::{list_tag_names, resolve_tags};
use crate::search::memo_query;
use log::{error, info};
use rusqlite::{params, Connection};
use std::time::Instant;

/// Repository interface for memo storage and queries.
pub trait MemoRepository {
    /// Creates one memo with the tags named in `raw_tags`.
    ///
    /// Callers guarantee `title` and `body` are non-empty; this layer does
    /// not check again.
    fn create_memo(&mut self, title: &str, body: &str, raw_tags: &str) -> StoreResult<MemoId>;
    /// Deletes one memo and its tag links, returning how many memo rows
    /// were removed. Missing ids succeed as a no-op and return `0`.
    fn delete_memo(&mut self, memo_id: MemoId) -> StoreResult<usize>;
    /// Reports whether a memo with `memo_id` exists.
    fn memo_exists(&self, memo_id: MemoId) -> StoreResult<bool>;
    fn get_memo(&self, memo_id: MemoId) -> StoreResult<Option<MemoRecord>>;
    fn list_all(&self) -> StoreResult<Vec<MemoRecord>>;
    fn search_by_keyword(&self, keyword: &str) -> StoreResult<Vec<MemoRecord>>;
    fn search_by_tags(&self, raw_tags: &str) -> StoreResult<Vec<MemoRecord>>;
    /// Returns all known tag names sorted by name.
    fn list_tags(&self) -> StoreResult<Vec<String>>;
}

/// SQLite-backed memo repository over one borrowed connection.
pub struct SqliteMemoRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteMemoRepository<'conn> {
    /// Constructs a repository after making sure the schema is in place.
    pub fn try_new(conn: &'conn mut Connection) -> StoreResult<Self> {
        ensure_schema(conn)?;
        Ok(Self { conn })
    }
}

impl MemoRepository for SqliteMemoRepository<'_> {
    fn create_memo(&mut self, title: &str, body: &str, raw_tags: &str) -> StoreResult<MemoId> {
        let started_at = Instant::now();
        let result = write_unit(self.conn, |tx| -> rusqlite::Result<(MemoId, usize)> {
            tx.execute(
                "INSERT INTO memos (title, body) VALUES (?1, ?2);",
                params![title, body],
            )?;
            let memo_id = tx.last_insert_rowid();

            let tag_ids = resolve_tags(tx, raw_tags)?;
            for tag_id in &tag_ids {
                tx.execute(
                    "INSERT INTO memo_tags (memo_id, tag_id) VALUES (?1, ?2);",
                    params![memo_id, tag_id],
                )?;
            }

            Ok((memo_id, tag_ids.len()))
        });

        match result {
            Ok((memo_id, tag_count)) => {
                info!(
                    "event=memo_create module=repo status=ok duration_ms={} memo_id={} tag_count={}",
                    started_at.elapsed().as_millis(),
                    memo_id,
                    tag_count
                );
                Ok(memo_id)
            }
            Err(err) => {
                error!(
                    "event=memo_create module=repo status=error duration_ms={} error_code=storage_write_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(StoreError::StorageWrite(err))
            }
        }
    }

    fn delete_memo(&mut self, memo_id: MemoId) -> StoreResult<usize> {
        let started_at = Instant::now();
        let result = write_unit(self.conn, |tx| -> rusqlite::Result<(usize, usize)> {
            let links = tx.execute("DELETE FROM memo_tags WHERE memo_id = ?1;", [memo_id])?;
            let memos = tx.execute("DELETE FROM memos WHERE id = ?1;", [memo_id])?;
            Ok((memos, links))
        });

        match result {
            Ok((memos, links)) => {
                info!(
                    "event=memo_delete module=repo status=ok duration_ms={} memo_id={} removed={} link_count={}",
                    started_at.elapsed().as_millis(),
                    memo_id,
                    memos,
                    links
                );
                Ok(memos)
            }
            Err(err) => {
                error!(
                    "event=memo_delete module=repo status=error duration_ms={} memo_id={} error_code=storage_write_failed error={}",
                    started_at.elapsed().as_millis(),
                    memo_id,
                    err
                );
                Err(StoreError::StorageWrite(err))
            }
        }
    }

    fn memo_exists(&self, memo_id: MemoId) -> StoreResult<bool> {
        let exists: i64 = self
            .conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM memos WHERE id = ?1);",
                [memo_id],
                |row| row.get(0),
            )
            .map_err(StoreError::StorageRead)?;
        Ok(exists == 1)
    }

    fn get_memo(&self, memo_id: MemoId) -> StoreResult<Option<MemoRecord>> {
        memo_query::get_memo(self.conn, memo_id)
    }

    fn list_all(&self) -> StoreResult<Vec<MemoRecord>> {
        memo_query::list_all(self.conn)
    }

    fn search_by_keyword(&self, keyword: &str) -> StoreResult<Vec<MemoRecord>> {
        memo_query::search_by_keyword(self.conn, keyword)
    }

    fn search_by_tags(&self, raw_tags: &str) -> StoreResult<Vec<MemoRecord>> {
        memo_query::search_by_tags(self.conn, raw_tags)
    }

    fn list_tags(&self) -> StoreResult<Vec<String>> {
        list_tag_names(self.conn).map_err(StoreError::StorageRead)
    }
}
