//! Core domain logic for the Bookshelf personal library catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookId, BookValidationError, NewBook, MIN_YEAR_EXCLUSIVE};
pub use model::genre::{Genre, UnknownGenre};
pub use repo::book_repo::{
    BookCounts, BookRepository, RepoError, RepoResult, SearchField, SqliteBookRepository,
};
pub use service::library_service::{LibraryService, LibraryStats, StoreError, StoreResult};
pub use service::library_store::LibraryStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
