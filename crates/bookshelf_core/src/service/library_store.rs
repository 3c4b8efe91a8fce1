//! Connection-owning store handle.
//!
//! # Responsibility
//! - Open (and thereby initialize) the library database.
//! - Hand out short-lived [`LibraryService`] views over the owned connection.
//!
//! # Invariants
//! - One store owns exactly one connection; dropping the store closes it.
//! - Every call re-reads storage through a fresh repository borrow.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::book::{Book, BookId, NewBook};
use crate::repo::book_repo::{RepoResult, SearchField, SqliteBookRepository};
use crate::service::library_service::{LibraryService, LibraryStats, StoreResult};
use rusqlite::Connection;
use std::path::Path;

/// Explicit handle over a library database file.
pub struct LibraryStore {
    conn: Connection,
}

impl LibraryStore {
    /// Opens the library at `path`, creating the file and schema when absent.
    ///
    /// # Errors
    /// - Returns an error when the file cannot be opened or its schema is
    ///   newer than this binary supports.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a throwaway in-memory library.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an existing connection after checking its schema is current.
    pub fn from_connection(conn: Connection) -> StoreResult<Self> {
        SqliteBookRepository::try_new(&conn)?;
        Ok(Self { conn })
    }

    /// Borrows a service bound to this store's connection.
    pub fn service(&self) -> StoreResult<LibraryService<SqliteBookRepository<'_>>> {
        Ok(LibraryService::new(SqliteBookRepository::try_new(
            &self.conn,
        )?))
    }

    /// Closes the underlying connection, reporting any close failure.
    pub fn close(self) -> StoreResult<()> {
        self.conn
            .close()
            .map_err(|(_, err)| DbError::from(err))?;
        Ok(())
    }

    pub fn add(&self, book: &NewBook) -> StoreResult<RepoResult<BookId>> {
        Ok(self.service()?.add(book))
    }

    pub fn add_book(
        &self,
        title: &str,
        author: &str,
        year: i64,
        genre: &str,
        read: bool,
    ) -> StoreResult<bool> {
        self.service()?.add_book(title, author, year, genre, read)
    }

    pub fn remove(&self, title: &str) -> StoreResult<RepoResult<usize>> {
        Ok(self.service()?.remove(title))
    }

    pub fn remove_book(&self, title: &str) -> StoreResult<bool> {
        self.service()?.remove_book(title)
    }

    pub fn search_books(&self, query: &str, field: SearchField) -> StoreResult<Vec<Book>> {
        self.service()?.search_books(query, field)
    }

    pub fn list_all_books(&self) -> StoreResult<Vec<Book>> {
        self.service()?.list_all_books()
    }

    pub fn get_book(&self, title: &str) -> StoreResult<Option<Book>> {
        self.service()?.get_book(title)
    }

    pub fn get_statistics(&self) -> StoreResult<LibraryStats> {
        self.service()?.get_statistics()
    }
}
