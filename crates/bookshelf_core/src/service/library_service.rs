//! Library use-case service.
//!
//! # Responsibility
//! - Provide the add/remove/search/list/statistics entry points for callers.
//! - Fold business-rule failures into pass/fail results at this boundary.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Only storage failures are returned as `Err`; validation, duplicate and
//!   not-found outcomes become `Ok(false)` on the pass/fail APIs.
//! - No state is cached between calls.

use crate::db::DbError;
use crate::model::book::{Book, BookId, NewBook};
use crate::model::genre::Genre;
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult, SearchField};
use log::{error, info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Unrecoverable storage failure surfaced to callers.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "library storage unavailable: {err}"),
            Self::Repo(err) => write!(f, "library storage unavailable: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Db(err) => Self::Db(err),
            other => Self::Repo(other),
        }
    }
}

/// Collection-wide statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total: u64,
    pub read: u64,
    /// `read / total * 100`, or `0.0` for an empty collection.
    pub percent_read: f64,
}

impl LibraryStats {
    pub fn new(total: u64, read: u64) -> Self {
        let percent_read = if total == 0 {
            0.0
        } else {
            read as f64 / total as f64 * 100.0
        };
        Self {
            total,
            read,
            percent_read,
        }
    }

    /// Percentage formatted with two decimals, e.g. `"25.00"`.
    pub fn percent_read_display(&self) -> String {
        format!("{:.2}", self.percent_read)
    }
}

impl Display for LibraryStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} books, {:.2}% read", self.total, self.percent_read)
    }
}

/// Use-case service over any [`BookRepository`].
pub struct LibraryService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> LibraryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a book and reports the typed outcome.
    ///
    /// Returns `Validation` or `DuplicateTitle` without writing anything.
    pub fn add(&self, book: &NewBook) -> RepoResult<BookId> {
        let result = self.repo.insert_book(book);
        match &result {
            Ok(id) => info!("event=book_add module=store status=ok book_id={id}"),
            Err(err) => log_outcome("book_add", err),
        }
        result
    }

    /// Adds a book from plain values. `genre` must be an exact genre label.
    ///
    /// # Contract
    /// - Returns `Ok(true)` when the book was inserted.
    /// - Returns `Ok(false)` on empty title/author, `year <= 800`, unknown
    ///   genre or an existing identical title. Nothing is written.
    /// - Returns `Err` only on storage failure.
    pub fn add_book(
        &self,
        title: &str,
        author: &str,
        year: i64,
        genre: &str,
        read: bool,
    ) -> StoreResult<bool> {
        let book = match NewBook::with_genre_label(title, author, year, genre, read) {
            Ok(book) => book,
            Err(err) => {
                log_outcome("book_add", &RepoError::Validation(err));
                return Ok(false);
            }
        };
        pass_fail(self.add(&book).map(|_| ()))
    }

    /// Removes every book with exactly `title` and reports the typed outcome.
    pub fn remove(&self, title: &str) -> RepoResult<usize> {
        let result = self.repo.delete_by_title(title);
        match &result {
            Ok(removed) => info!("event=book_remove module=store status=ok removed={removed}"),
            Err(err) => log_outcome("book_remove", err),
        }
        result
    }

    /// Removes a book by exact title.
    ///
    /// # Contract
    /// - Returns `Ok(false)` for an empty title or when no book matches.
    /// - Returns `Err` only on storage failure.
    pub fn remove_book(&self, title: &str) -> StoreResult<bool> {
        pass_fail(self.remove(title).map(|_| ()))
    }

    /// Returns books whose `field` contains `query` (case-sensitive).
    ///
    /// An empty query matches every book. Results are in insertion order.
    pub fn search_books(&self, query: &str, field: SearchField) -> StoreResult<Vec<Book>> {
        let books = self.repo.search_books(query, field)?;
        info!(
            "event=book_search module=store status=ok field={} query_len={} hits={}",
            field,
            query.chars().count(),
            books.len()
        );
        Ok(books)
    }

    /// Returns every book in insertion order.
    pub fn list_all_books(&self) -> StoreResult<Vec<Book>> {
        Ok(self.repo.list_books()?)
    }

    /// Looks up one book by exact title.
    pub fn get_book(&self, title: &str) -> StoreResult<Option<Book>> {
        Ok(self.repo.get_by_title(title)?)
    }

    /// Computes total count and read percentage.
    pub fn get_statistics(&self) -> StoreResult<LibraryStats> {
        let counts = self.repo.count_books()?;
        Ok(LibraryStats::new(counts.total, counts.read))
    }

    /// The closed genre set accepted by [`Self::add_book`].
    pub fn genres(&self) -> &'static [Genre] {
        &Genre::ALL
    }
}

fn pass_fail(result: RepoResult<()>) -> StoreResult<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.is_storage_failure() => Err(err.into()),
        Err(_) => Ok(false),
    }
}

fn log_outcome(event: &str, err: &RepoError) {
    if err.is_storage_failure() {
        error!(
            "event={event} module=store status=error error_code={} error={err}",
            err.code()
        );
    } else {
        warn!(
            "event={event} module=store status=rejected reason={}",
            err.code()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::LibraryStats;

    #[test]
    fn empty_collection_has_zero_percent() {
        let stats = LibraryStats::new(0, 0);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percent_read, 0.0);
        assert_eq!(stats.percent_read_display(), "0.00");
    }

    #[test]
    fn percent_is_rendered_with_two_decimals() {
        let stats = LibraryStats::new(3, 1);
        assert_eq!(stats.percent_read_display(), "33.33");
        assert_eq!(stats.to_string(), "3 books, 33.33% read");
    }
}
