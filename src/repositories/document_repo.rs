#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::BookRepository;
use crate::{Book, BookId, RepositoryError, RepositoryResult};
use tracing::warn;

/// Demonstration payload. The closing bracket is missing on purpose.
pub const SAMPLE_RAW_BOOKS: &str = r#"["Book 1", "Book 2""#;

/// Books held as a JSON array of strings, parsed on every call.
#[derive(Debug, Clone)]
pub struct DocumentBookRepository {
    raw_books: String,
}

impl DocumentBookRepository {
    #[must_use]
    pub fn new(raw_books: impl Into<String>) -> Self {
        Self {
            raw_books: raw_books.into(),
        }
    }

    #[must_use]
    pub fn sample() -> Self {
        Self::new(SAMPLE_RAW_BOOKS)
    }

    fn parse(&self) -> Result<Vec<Book>, serde_json::Error> {
        serde_json::from_str(&self.raw_books)
    }
}

impl BookRepository for DocumentBookRepository {
    fn fetch_all(&self) -> RepositoryResult<Vec<Book>> {
        self.parse().map_err(|e| {
            warn!("document fetch_all: {e}");
            RepositoryError::fetch_all(e)
        })
    }

    fn fetch_by_id(&self, id: &BookId) -> RepositoryResult<Option<Book>> {
        self.parse()
            .map(|books| books.into_iter().find(|book| book.matches(id)))
            .map_err(|e| {
                warn!(book_id = %id, "document fetch_by_id: {e}");
                RepositoryError::fetch_by_id(e)
            })
    }
}
