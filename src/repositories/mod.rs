#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod db_repo;
mod document_repo;

pub use db_repo::{DbBookRepository, PgDriver, SqlDriver};
pub use document_repo::{DocumentBookRepository, SAMPLE_RAW_BOOKS};

use crate::{Book, BookId, RepositoryResult};

/// Read access to a source of books.
///
/// Implementations convert every collaborator failure into a
/// [`RepositoryError`](crate::RepositoryError) before returning. An empty
/// catalog or an unknown id is `Ok`, never `Err`.
pub trait BookRepository {
    /// # Errors
    /// Returns an error when the underlying source cannot be read.
    fn fetch_all(&self) -> RepositoryResult<Vec<Book>>;

    /// # Errors
    /// Returns an error when the underlying source cannot be read.
    fn fetch_by_id(&self, id: &BookId) -> RepositoryResult<Option<Book>>;
}

impl<R: BookRepository + ?Sized> BookRepository for &R {
    fn fetch_all(&self) -> RepositoryResult<Vec<Book>> {
        (**self).fetch_all()
    }

    fn fetch_by_id(&self, id: &BookId) -> RepositoryResult<Option<Book>> {
        (**self).fetch_by_id(id)
    }
}

impl<R: BookRepository + ?Sized> BookRepository for Box<R> {
    fn fetch_all(&self) -> RepositoryResult<Vec<Book>> {
        (**self).fetch_all()
    }

    fn fetch_by_id(&self, id: &BookId) -> RepositoryResult<Option<Book>> {
        (**self).fetch_by_id(id)
    }
}
