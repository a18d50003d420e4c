//! Tag resolver: maps a raw tag string to canonical tag ids.
//!
//! # Responsibility
//! - Reuse an existing `tags` row by exact name, or create it on first use.
//! - List every known tag name.
//!
//! # Invariants
//! - A tag name is never inserted twice (`tags.name` is UNIQUE as well).
//! - Resolution runs inside the caller's write unit; it never commits.

use crate::model::memo::TagId;
use crate::model::tags::parse_tag_list;
use log::debug;
use rusqlite::{Connection, OptionalExtension};

/// Resolves `raw` to tag ids in normalized input order.
///
/// Blank input resolves to an empty list without touching storage.
pub fn resolve_tags(conn: &Connection, raw: &str) -> rusqlite::Result<Vec<TagId>> {
    let names = parse_tag_list(raw);
    let mut ids = Vec::with_capacity(names.len());
    let mut created = 0usize;

    for name in &names {
        let existing: Option<TagId> = conn
            .query_row(
                "SELECT id FROM tags WHERE name = ?1;",
                [name.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        let id = match existing {
            Some(id) => id,
            None => {
                conn.execute("INSERT INTO tags (name) VALUES (?1);", [name.as_str()])?;
                created += 1;
                conn.last_insert_rowid()
            }
        };
        ids.push(id);
    }

    debug!(
        "event=tags_resolve module=repo status=ok tag_count={} created_count={}",
        ids.len(),
        created
    );
    Ok(ids)
}

/// Returns every tag name, including tags no memo references any more.
pub fn list_tag_names(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM tags ORDER BY name ASC;")?;
    let mut rows = stmt.query([])?;
    let mut names = Vec::new();
    while let Some(row) = rows.next()? {
        names.push(row.get("name")?);
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::{list_tag_names, resolve_tags};
    use crate::db::open_db_in_memory;

    #[test]
    fn reuses_existing_rows_and_creates_missing_ones() {
        let conn = open_db_in_memory().unwrap();
        let first = resolve_tags(&conn, "x, y").unwrap();
        let second = resolve_tags(&conn, "y, z").unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert_eq!(first[1], second[0]);
        assert_eq!(list_tag_names(&conn).unwrap(), vec!["x", "y", "z"]);
    }

    #[test]
    fn blank_input_touches_nothing() {
        let conn = open_db_in_memory().unwrap();
        assert!(resolve_tags(&conn, " , ").unwrap().is_empty());
        assert!(list_tag_names(&conn).unwrap().is_empty());
    }

    #[test]
    fn duplicate_names_in_one_input_resolve_once() {
        let conn = open_db_in_memory().unwrap();
        let ids = resolve_tags(&conn, " a , a, b ").unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(list_tag_names(&conn).unwrap(), vec!["a", "b"]);
    }
}
