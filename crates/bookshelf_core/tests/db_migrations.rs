use bookshelf_core::db::migrations::latest_version;
use bookshelf_core::db::{open_db, open_db_in_memory, DbError};
use bookshelf_core::{LibraryStore, StoreError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_books_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "books");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO books (title, author, year, genre, read)
             VALUES ('Dune', 'Frank Herbert', 1965, 'Science fiction', 1);",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

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

    assert!(matches!(
        LibraryStore::open(&path),
        Err(StoreError::Db(DbError::UnsupportedSchemaVersion { .. }))
    ));
}

#[test]
fn opening_unwritable_location_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-parent").join("library.db");

    assert!(matches!(
        LibraryStore::open(&path),
        Err(StoreError::Db(DbError::Sqlite(_)))
    ));
}

#[test]
fn schema_enforces_unique_titles_and_year_bound() {
    let conn = open_db_in_memory().unwrap();
    let insert = "INSERT INTO books (title, author, year, genre, read) VALUES (?1, ?2, ?3, ?4, 0);";

    conn.execute(insert, rusqlite::params!["Emma", "Jane Austen", 1815, "Fiction"])
        .unwrap();
    assert!(conn
        .execute(insert, rusqlite::params!["Emma", "Someone Else", 2001, "Comedy"])
        .is_err());
    assert!(conn
        .execute(insert, rusqlite::params!["Beowulf", "Unknown", 700, "Fiction"])
        .is_err());
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
