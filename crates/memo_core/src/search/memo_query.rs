//! Memo query engine.
//!
//! # Responsibility
//! - Project memo rows joined with their aggregated tag names.
//! - Filter by substring keyword or by tag intersection.
//!
//! # Invariants
//! - Every query is one SQL statement, so it reads one consistent snapshot.
//! - Each memo appears at most once per result, ordered by `id ASC`.
//! - Keyword and tag matching are case-sensitive.
//! - Tag filters use the same normalization as tag resolution; an empty
//!   filter matches every memo.

use crate::model::memo::{MemoId, MemoRecord};
use crate::model::tags::parse_tag_list;
use crate::repo::error::{StoreError, StoreResult};
use log::{debug, error};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::time::Instant;

const MEMO_SELECT_SQL: &str = "SELECT
    m.id AS id,
    m.title AS title,
    m.body AS body,
    (
        SELECT group_concat(t.name, ',')
        FROM memo_tags mt
        INNER JOIN tags t ON t.id = mt.tag_id
        WHERE mt.memo_id = m.id
    ) AS tags
FROM memos m";

/// Returns every memo with its tags.
pub fn list_all(conn: &Connection) -> StoreResult<Vec<MemoRecord>> {
    run_query(
        conn,
        "list_all",
        format!("{MEMO_SELECT_SQL} ORDER BY m.id ASC;"),
        Vec::new(),
    )
}

/// Returns one memo by id, or `None` when it does not exist.
pub fn get_memo(conn: &Connection, memo_id: MemoId) -> StoreResult<Option<MemoRecord>> {
    let records = run_query(
        conn,
        "get_memo",
        format!("{MEMO_SELECT_SQL} WHERE m.id = ?1;"),
        vec![Value::Integer(memo_id)],
    )?;
    Ok(records.into_iter().next())
}

/// Returns memos whose title or body contains `keyword`.
///
/// `instr` is used instead of `LIKE` so `%`/`_` match literally and case
/// is significant. An empty keyword matches every memo.
pub fn search_by_keyword(conn: &Connection, keyword: &str) -> StoreResult<Vec<MemoRecord>> {
    if keyword.is_empty() {
        return list_all(conn);
    }

    run_query(
        conn,
        "search_keyword",
        format!(
            "{MEMO_SELECT_SQL}
             WHERE instr(m.title, ?1) > 0
                OR instr(m.body, ?1) > 0
             ORDER BY m.id ASC;"
        ),
        vec![Value::Text(keyword.to_string())],
    )
}

/// Returns memos carrying every tag named in `raw_tags`.
pub fn search_by_tags(conn: &Connection, raw_tags: &str) -> StoreResult<Vec<MemoRecord>> {
    let names = parse_tag_list(raw_tags);
    if names.is_empty() {
        return list_all(conn);
    }

    let placeholders = vec!["?"; names.len()].join(", ");
    let required = names.len() as i64;
    let mut bind_values: Vec<Value> = names.into_iter().map(Value::Text).collect();
    bind_values.push(Value::Integer(required));

    run_query(
        conn,
        "search_tags",
        format!(
            "{MEMO_SELECT_SQL}
             WHERE m.id IN (
                SELECT mt.memo_id
                FROM memo_tags mt
                INNER JOIN tags t ON t.id = mt.tag_id
                WHERE t.name IN ({placeholders})
                GROUP BY mt.memo_id
                HAVING COUNT(DISTINCT t.id) = ?
             )
             ORDER BY m.id ASC;"
        ),
        bind_values,
    )
}

fn run_query(
    conn: &Connection,
    event: &str,
    sql: String,
    bind_values: Vec<Value>,
) -> StoreResult<Vec<MemoRecord>> {
    let started_at = Instant::now();
    match collect_records(conn, &sql, bind_values) {
        Ok(records) => {
            debug!(
                "event={} module=search status=ok duration_ms={} result_count={}",
                event,
                started_at.elapsed().as_millis(),
                records.len()
            );
            Ok(records)
        }
        Err(err) => {
            error!(
                "event={} module=search status=error duration_ms={} error_code={} error={}",
                event,
                started_at.elapsed().as_millis(),
                err.code(),
                err
            );
            Err(err)
        }
    }
}

fn collect_records(
    conn: &Connection,
    sql: &str,
    bind_values: Vec<Value>,
) -> StoreResult<Vec<MemoRecord>> {
    let mut stmt = conn.prepare(sql).map_err(StoreError::StorageRead)?;
    let mut rows = stmt
        .query(params_from_iter(bind_values))
        .map_err(StoreError::StorageRead)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next().map_err(StoreError::StorageRead)? {
        records.push(parse_memo_row(row)?);
    }
    Ok(records)
}

fn parse_memo_row(row: &Row<'_>) -> StoreResult<MemoRecord> {
    let record = MemoRecord {
        id: row.get("id").map_err(map_decode_error)?,
        title: row.get("title").map_err(map_decode_error)?,
        body: row.get("body").map_err(map_decode_error)?,
        tags: row.get("tags").map_err(map_decode_error)?,
    };
    if record.title.is_empty() || record.body.is_empty() {
        return Err(StoreError::InvalidData(format!(
            "memo {} has an empty title or body",
            record.id
        )));
    }
    Ok(record)
}

fn map_decode_error(err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..) => {
            StoreError::InvalidData(err.to_string())
        }
        other => StoreError::StorageRead(other),
    }
}
