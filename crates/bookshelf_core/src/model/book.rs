//! Book domain model.
//!
//! # Responsibility
//! - Define the stored `Book` record and the `NewBook` insert request.
//! - Own field validation shared by every write and read path.
//!
//! # Invariants
//! - `title` and `author` are non-empty.
//! - `year` is strictly greater than [`MIN_YEAR_EXCLUSIVE`].
//! - `id` is assigned by storage and never reused.

use crate::model::genre::Genre;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned identity. Monotonically increasing, never reused.
pub type BookId = i64;

/// Years at or below this bound are rejected.
pub const MIN_YEAR_EXCLUSIVE: i64 = 800;

/// Field-level validation failure for a book record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
    YearOutOfRange(i64),
    UnknownGenre(String),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyAuthor => write!(f, "author must not be empty"),
            Self::YearOutOfRange(year) => {
                write!(f, "year {year} must be greater than {MIN_YEAR_EXCLUSIVE}")
            }
            Self::UnknownGenre(genre) => write!(f, "unknown genre `{genre}`"),
        }
    }
}

impl Error for BookValidationError {}

impl BookValidationError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::EmptyAuthor => "empty_author",
            Self::YearOutOfRange(_) => "year_out_of_range",
            Self::UnknownGenre(_) => "unknown_genre",
        }
    }
}

/// Insert request for a book that has no identity yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub genre: Genre,
    pub read: bool,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i64,
        genre: Genre,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre,
            read,
        }
    }

    /// Builds a request from a free-text genre label.
    ///
    /// # Errors
    /// - Returns `UnknownGenre` when `genre` is not an exact label of [`Genre`].
    pub fn with_genre_label(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i64,
        genre: &str,
        read: bool,
    ) -> Result<Self, BookValidationError> {
        let genre = genre
            .parse::<Genre>()
            .map_err(|err| BookValidationError::UnknownGenre(err.0))?;
        Ok(Self::new(title, author, year, genre, read))
    }

    /// Checks field constraints. Genre is enforced by the type.
    ///
    /// Whitespace-only strings count as non-empty.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_fields(&self.title, &self.author, self.year)
    }
}

/// Persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub genre: Genre,
    pub read: bool,
}

impl Book {
    /// Re-checks stored fields; used when decoding rows.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_fields(&self.title, &self.author, self.year)
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} - {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            if self.read { "Read" } else { "Unread" }
        )
    }
}

fn validate_fields(title: &str, author: &str, year: i64) -> Result<(), BookValidationError> {
    if title.is_empty() {
        return Err(BookValidationError::EmptyTitle);
    }
    if author.is_empty() {
        return Err(BookValidationError::EmptyAuthor);
    }
    if year <= MIN_YEAR_EXCLUSIVE {
        return Err(BookValidationError::YearOutOfRange(year));
    }
    Ok(())
}
