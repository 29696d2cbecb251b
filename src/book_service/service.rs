use super::BatchLookup;
use crate::repositories::BookRepository;
use crate::{Book, BookId, RepositoryResult, ServiceError, ServiceResult};
use tap::TapFallible;
use tracing::debug;

/// Serves books from a primary repository and exercises a secondary one on
/// every successful read.
///
/// The secondary's outcome is discarded, failures included. It is a side
/// path only: it never replaces the primary's value and is not consulted
/// when the primary fails.
pub struct BookService<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> BookService<P, S>
where
    P: BookRepository,
    S: BookRepository,
{
    #[must_use]
    pub const fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    /// # Errors
    /// Returns a [`ServiceError`] wrapping the primary repository's failure.
    pub fn all(&self) -> ServiceResult<Vec<Book>> {
        self.primary
            .fetch_all()
            .tap_ok(|_| discard("fetch_all", self.secondary.fetch_all()))
            .map_err(ServiceError::all_books)
    }

    /// # Errors
    /// Returns a [`ServiceError`] wrapping the primary repository's failure.
    pub fn book_by_id(&self, id: &BookId) -> ServiceResult<Option<Book>> {
        self.primary
            .fetch_by_id(id)
            .tap_ok(|_| discard("fetch_by_id", self.secondary.fetch_by_id(id)))
            .map_err(ServiceError::book_by_id)
    }

    /// Looks up every id, collecting failures alongside the hits instead of
    /// stopping at the first one.
    pub fn books_by_ids<I>(&self, ids: I) -> BatchLookup
    where
        I: IntoIterator<Item = BookId>,
    {
        ids.into_iter()
            .fold(BatchLookup::default(), |mut lookup, id| {
                let outcome = self.book_by_id(&id);
                lookup.record(id, outcome);
                lookup
            })
    }
}

fn discard<T>(operation: &str, outcome: RepositoryResult<T>) {
    if let Err(e) = outcome {
        debug!(operation, "secondary repository failed, ignoring: {e}");
    }
}
