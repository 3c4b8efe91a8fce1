//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/delete/query APIs over canonical `books` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `NewBook::validate()` before SQL mutations.
//! - Title uniqueness is enforced by the `UNIQUE` index; the failed insert
//!   itself is the duplicate signal, there is no prior existence probe.
//! - Read paths must reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::book::{Book, BookId, BookValidationError, NewBook};
use crate::model::genre::Genre;
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    year,
    genre,
    read
FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    DuplicateTitle(String),
    NotFound(String),
    InvalidData(String),
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl RepoError {
    /// Returns `true` for storage-medium failures that no caller can recover from.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Db(_)
                | Self::InvalidData(_)
                | Self::UninitializedConnection { .. }
                | Self::MissingRequiredTable(_)
        )
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.code(),
            Self::DuplicateTitle(_) => "duplicate_title",
            Self::NotFound(_) => "not_found",
            Self::InvalidData(_) => "invalid_data",
            Self::Db(_) => "db_error",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_required_table",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateTitle(title) => write!(f, "a book titled `{title}` already exists"),
            Self::NotFound(title) => write!(f, "no book titled `{title}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Book field targeted by a substring search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    fn column(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
        }
    }
}

impl Display for SearchField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            other => Err(format!(
                "unsupported search field `{other}`; expected title|author"
            )),
        }
    }
}

/// Aggregate counts over the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookCounts {
    pub total: u64,
    pub read: u64,
}

/// Repository interface for book operations.
pub trait BookRepository {
    fn insert_book(&self, book: &NewBook) -> RepoResult<BookId>;
    fn delete_by_title(&self, title: &str) -> RepoResult<usize>;
    fn get_by_title(&self, title: &str) -> RepoResult<Option<Book>>;
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    fn search_books(&self, query: &str, field: SearchField) -> RepoResult<Vec<Book>>;
    fn count_books(&self) -> RepoResult<BookCounts>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a connection opened via [`crate::db::open_db`].
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    /// - `MissingRequiredTable` when `books` does not exist.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        if !table_exists(conn, "books")? {
            return Err(RepoError::MissingRequiredTable("books"));
        }
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn insert_book(&self, book: &NewBook) -> RepoResult<BookId> {
        book.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO books (title, author, year, genre, read)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                book.title.as_str(),
                book.author.as_str(),
                book.year,
                book.genre.label(),
                bool_to_int(book.read),
            ],
        );

        match inserted {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(err) if is_unique_violation(&err) => {
                Err(RepoError::DuplicateTitle(book.title.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn delete_by_title(&self, title: &str) -> RepoResult<usize> {
        if title.is_empty() {
            return Err(BookValidationError::EmptyTitle.into());
        }

        let changed = self
            .conn
            .execute("DELETE FROM books WHERE title = ?1;", [title])?;

        if changed == 0 {
            return Err(RepoError::NotFound(title.to_string()));
        }

        Ok(changed)
    }

    fn get_by_title(&self, title: &str) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE title = ?1;"))?;

        let mut rows = stmt.query([title])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;
        let rows = stmt.query([])?;
        collect_books(rows)
    }

    fn search_books(&self, query: &str, field: SearchField) -> RepoResult<Vec<Book>> {
        // instr() is case-sensitive and has no wildcard characters, unlike LIKE.
        let sql = format!(
            "{BOOK_SELECT_SQL} WHERE instr({}, ?1) > 0 ORDER BY id ASC;",
            field.column()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query([query])?;
        collect_books(rows)
    }

    fn count_books(&self) -> RepoResult<BookCounts> {
        let (total, read) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(read), 0) FROM books;",
            [],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        )?;

        let total = u64::try_from(total)
            .map_err(|_| RepoError::InvalidData(format!("negative book count {total}")))?;
        let read = u64::try_from(read)
            .map_err(|_| RepoError::InvalidData(format!("negative read count {read}")))?;

        Ok(BookCounts { total, read })
    }
}

fn collect_books(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Book>> {
    let mut books = Vec::new();
    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }
    Ok(books)
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let genre_text: String = row.get("genre")?;
    let genre = genre_text.parse::<Genre>().map_err(|_| {
        RepoError::InvalidData(format!("invalid genre `{genre_text}` in books.genre"))
    })?;

    let read = match row.get::<_, i64>("read")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid read value `{other}` in books.read"
            )));
        }
    };

    let book = Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        year: row.get("year")?,
        genre,
        read,
    };
    book.validate()
        .map_err(|err| RepoError::InvalidData(format!("book {}: {err}", book.id)))?;
    Ok(book)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

fn table_exists(conn: &Connection, table_name: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::SearchField;

    #[test]
    fn search_field_parses_case_insensitively() {
        assert_eq!("Title".parse::<SearchField>(), Ok(SearchField::Title));
        assert_eq!(" AUTHOR ".parse::<SearchField>(), Ok(SearchField::Author));
        assert!("genre".parse::<SearchField>().is_err());
    }
}
