use daybook_core::db::migrations::latest_version;
use daybook_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "events");
    assert_table_exists(&conn, "transactions");
    assert_index_exists(&conn, "idx_events_start_date");
    assert_index_exists(&conn, "idx_transactions_date");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daybook.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO events (title, start_date, end_date) VALUES ('kept', '2024-05-01', '2024-05-01');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM events;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn open_db_reports_uncreatable_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"file").unwrap();

    let err = open_db(blocker.join("data").join("daybook.sqlite3")).unwrap_err();
    match err {
        DbError::CreateDir { path, .. } => assert_eq!(path, blocker.join("data")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn open_db_creates_missing_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("daybook.sqlite3");

    open_db(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
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
fn transaction_type_is_constrained_by_schema() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO transactions (date, amount, type, category) VALUES ('2024-05-01', 10, 'refund', 'misc');",
        [],
    );
    assert!(result.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    assert_schema_object(conn, "table", table_name);
}

fn assert_index_exists(conn: &Connection, index_name: &str) {
    assert_schema_object(conn, "index", index_name);
}

fn assert_schema_object(conn: &Connection, kind: &str, name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = ?1 AND name = ?2
            );",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "{kind} {name} does not exist");
}
