use crate::{Book, BookId, ServiceError, ServiceResult};

/// Outcome of a multi-id lookup, in input order.
#[derive(Debug, Default)]
pub struct BatchLookup {
    found: Vec<Book>,
    missing: Vec<BookId>,
    failures: Vec<(BookId, ServiceError)>,
}

impl BatchLookup {
    pub(super) fn record(&mut self, id: BookId, outcome: ServiceResult<Option<Book>>) {
        match outcome {
            Ok(Some(book)) => self.found.push(book),
            Ok(None) => self.missing.push(id),
            Err(e) => self.failures.push((id, e)),
        }
    }

    #[must_use]
    pub fn found(&self) -> &[Book] {
        &self.found
    }

    #[must_use]
    pub fn missing(&self) -> &[BookId] {
        &self.missing
    }

    #[must_use]
    pub fn failures(&self) -> &[(BookId, ServiceError)] {
        &self.failures
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
