use memo_core::db::migrations::latest_version;
use memo_core::{
    open_db, open_db_file, open_db_in_memory, with_db, DbError, MemoRepository,
    SqliteMemoRepository, StorageLocator, StoreError,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_all_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "memos");
    assert_table_exists(&conn, "tags");
    assert_table_exists(&conn, "memo_tags");
}

#[test]
fn reopening_file_database_keeps_data_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memos.sqlite3");

    let mut first = open_db_file(&path).unwrap();
    SqliteMemoRepository::try_new(&mut first)
        .unwrap()
        .create_memo("jacket", "testbody", "x")
        .unwrap();
    drop(first);

    let mut second = open_db(&StorageLocator::file(&path)).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let repo = SqliteMemoRepository::try_new(&mut second).unwrap();
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db_file(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn with_db_surfaces_init_failure_as_storage_init() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 999;")
        .unwrap();

    let result: Result<(), StoreError> = with_db(&StorageLocator::file(&path), |_conn| Ok(()));
    assert!(matches!(result, Err(StoreError::StorageInit(_))));
}

#[test]
fn with_db_runs_work_against_migrated_connection() {
    let dir = tempfile::tempdir().unwrap();
    let locator = StorageLocator::file(dir.path().join("memos.sqlite3"));

    let id = with_db(&locator, |conn| -> Result<i64, StoreError> {
        SqliteMemoRepository::try_new(conn)?.create_memo("a", "b", "")
    })
    .unwrap();

    let exists = with_db(&locator, |conn| -> Result<bool, StoreError> {
        SqliteMemoRepository::try_new(conn)?.memo_exists(id)
    })
    .unwrap();
    assert!(exists);
}

#[test]
fn foreign_keys_are_enforced_on_opened_connections() {
    let conn = open_db_in_memory().unwrap();
    let err = conn
        .execute(
            "INSERT INTO memo_tags (memo_id, tag_id) VALUES (41, 42);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().to_lowercase().contains("foreign key"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
