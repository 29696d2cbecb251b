#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use super::BookService;
use crate::repositories::{BookRepository, DocumentBookRepository};
use crate::{AccessError, Book, BookId, RepositoryError, RepositoryResult, ServiceError};
use std::cell::Cell;
use std::error::Error as _;

#[derive(Debug, Clone, Copy)]
enum Behaviour {
    Serve,
    Fail,
}

/// Repository double that counts calls and either serves `books` or fails
/// with a driver timeout.
#[derive(Debug)]
struct FakeRepository {
    books: Vec<Book>,
    behaviour: Behaviour,
    fetch_all_calls: Cell<u32>,
    fetch_by_id_calls: Cell<u32>,
}

impl FakeRepository {
    fn serving(titles: &[&str]) -> Self {
        Self {
            books: titles.iter().copied().map(Book::new).collect(),
            behaviour: Behaviour::Serve,
            fetch_all_calls: Cell::new(0),
            fetch_by_id_calls: Cell::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            behaviour: Behaviour::Fail,
            ..Self::serving(&[])
        }
    }
}

impl BookRepository for FakeRepository {
    fn fetch_all(&self) -> RepositoryResult<Vec<Book>> {
        self.fetch_all_calls.set(self.fetch_all_calls.get() + 1);
        match self.behaviour {
            Behaviour::Serve => Ok(self.books.clone()),
            Behaviour::Fail => Err(RepositoryError::fetch_all(sqlx::Error::PoolTimedOut)),
        }
    }

    fn fetch_by_id(&self, id: &BookId) -> RepositoryResult<Option<Book>> {
        self.fetch_by_id_calls.set(self.fetch_by_id_calls.get() + 1);
        match self.behaviour {
            Behaviour::Serve => Ok(self.books.iter().find(|book| book.matches(id)).cloned()),
            Behaviour::Fail => Err(RepositoryError::fetch_by_id(sqlx::Error::PoolTimedOut)),
        }
    }
}

fn root_repository_error(error: &ServiceError) -> &RepositoryError {
    error
        .source()
        .and_then(|source| source.downcast_ref::<RepositoryError>())
        .expect("service error must keep the repository error as its source")
}

mod all_tests {
    use super::*;

    #[test]
    fn primary_value_is_returned_when_secondary_fails() {
        let primary = FakeRepository::serving(&["Book 1", "Book 2"]);
        let secondary = FakeRepository::failing();
        let service = BookService::new(&primary, &secondary);

        let books = service.all().unwrap();

        assert_eq!(books, vec![Book::new("Book 1"), Book::new("Book 2")]);
        assert_eq!(secondary.fetch_all_calls.get(), 1);
    }

    #[test]
    fn secondary_value_never_leaks_into_result() {
        let primary = FakeRepository::serving(&["Book 1"]);
        let secondary = FakeRepository::serving(&["Other 1", "Other 2"]);
        let service = BookService::new(&primary, &secondary);

        assert_eq!(service.all().unwrap(), vec![Book::new("Book 1")]);
        assert_eq!(secondary.fetch_all_calls.get(), 1);
    }

    #[test]
    fn primary_failure_is_wrapped_with_cause() {
        let primary = FakeRepository::failing();
        let secondary = FakeRepository::serving(&["Book 1"]);
        let service = BookService::new(&primary, &secondary);

        let error = service.all().unwrap_err();

        assert_eq!(error.to_string(), "Error from service when get books");
        let cause = root_repository_error(&error);
        assert_eq!(cause.message(), "Error when get books");
        assert!(matches!(
            cause.cause(),
            AccessError::Driver(sqlx::Error::PoolTimedOut)
        ));
    }

    #[test]
    fn secondary_is_not_called_when_primary_fails() {
        let primary = FakeRepository::failing();
        let secondary = FakeRepository::serving(&["Book 1"]);
        let service = BookService::new(&primary, &secondary);

        let _ = service.all();

        assert_eq!(primary.fetch_all_calls.get(), 1);
        assert_eq!(secondary.fetch_all_calls.get(), 0);
    }

    #[test]
    fn empty_primary_is_a_success() {
        let primary = FakeRepository::serving(&[]);
        let secondary = FakeRepository::failing();
        let service = BookService::new(&primary, &secondary);

        assert!(service.all().unwrap().is_empty());
    }
}

mod book_by_id_tests {
    use super::*;

    #[test]
    fn found_book_survives_failing_secondary() {
        let primary = FakeRepository::serving(&["Book 1", "Book 2"]);
        let secondary = FakeRepository::failing();
        let service = BookService::new(&primary, &secondary);

        let book = service.book_by_id(&BookId::new("Book 2")).unwrap();

        assert_eq!(book, Some(Book::new("Book 2")));
        assert_eq!(secondary.fetch_by_id_calls.get(), 1);
    }

    #[test]
    fn absent_book_is_ok_none() {
        let primary = FakeRepository::serving(&["Book 1"]);
        let secondary = FakeRepository::serving(&["Book 3"]);
        let service = BookService::new(&primary, &secondary);

        assert_eq!(service.book_by_id(&BookId::new("Book 3")).unwrap(), None);
    }

    #[test]
    fn primary_failure_is_wrapped_with_cause() {
        let primary = FakeRepository::failing();
        let secondary = FakeRepository::serving(&["Book 1"]);
        let service = BookService::new(&primary, &secondary);

        let error = service.book_by_id(&BookId::new("Book 1")).unwrap_err();

        assert_eq!(error.message(), "Error from service when get book");
        assert_eq!(error.client_message(), "Error when get book, please try later");
        assert_eq!(root_repository_error(&error).message(), "Error when get book");
        assert_eq!(secondary.fetch_by_id_calls.get(), 0);
    }

    #[test]
    fn document_sources_compose_through_boxes() {
        let primary: Box<dyn BookRepository> =
            Box::new(DocumentBookRepository::new(r#"["Book 1","Book 2"]"#));
        let secondary: Box<dyn BookRepository> = Box::new(DocumentBookRepository::sample());
        let service = BookService::new(primary, secondary);

        assert_eq!(
            service.book_by_id(&BookId::new("Book 1")).unwrap(),
            Some(Book::new("Book 1"))
        );
    }
}

mod books_by_ids_tests {
    use super::*;

    #[test]
    fn sorts_outcomes_into_found_and_missing() {
        let primary = FakeRepository::serving(&["Book 1", "Book 2"]);
        let secondary = FakeRepository::serving(&[]);
        let service = BookService::new(&primary, &secondary);

        let lookup = service.books_by_ids(
            ["Book 2", "Book 9", "Book 1"].into_iter().map(BookId::new),
        );

        assert_eq!(lookup.found(), [Book::new("Book 2"), Book::new("Book 1")]);
        assert_eq!(lookup.missing(), [BookId::new("Book 9")]);
        assert!(lookup.is_complete());
        assert_eq!(primary.fetch_by_id_calls.get(), 3);
    }

    #[test]
    fn keeps_going_after_failures() {
        let primary = FakeRepository::failing();
        let secondary = FakeRepository::serving(&["Book 1"]);
        let service = BookService::new(&primary, &secondary);

        let lookup = service.books_by_ids(vec![BookId::new("1"), BookId::new("2")]);

        assert!(!lookup.is_complete());
        assert_eq!(lookup.failures().len(), 2);
        assert_eq!(lookup.failures()[1].0, BookId::new("2"));
        assert!(lookup.found().is_empty());
        assert_eq!(primary.fetch_by_id_calls.get(), 2);
    }
}

mod result_contract_tests {
    use super::*;

    #[test]
    fn map_err_leaves_success_untouched() {
        let calls = Cell::new(0);
        let ok: RepositoryResult<Vec<Book>> = Ok(vec![Book::new("Book 1")]);

        let mapped = ok.map_err(|e| {
            calls.set(calls.get() + 1);
            ServiceError::all_books(e)
        });

        assert_eq!(mapped.unwrap(), vec![Book::new("Book 1")]);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn fallback_is_skipped_on_success() {
        let primary = FakeRepository::serving(&["Book 1"]);
        let secondary = FakeRepository::serving(&[]);
        let service = BookService::new(&primary, &secondary);
        let calls = Cell::new(0);

        let books = service.all().unwrap_or_else(|_| {
            calls.set(calls.get() + 1);
            Vec::new()
        });

        assert_eq!(books, vec![Book::new("Book 1")]);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn fallback_runs_once_with_the_error() {
        let primary = FakeRepository::failing();
        let secondary = FakeRepository::serving(&[]);
        let service = BookService::new(&primary, &secondary);
        let seen = Cell::new(0);

        let book = service.book_by_id(&BookId::new("123")).unwrap_or_else(|e| {
            seen.set(seen.get() + 1);
            assert_eq!(e.message(), "Error from service when get book");
            None
        });

        assert_eq!(book, None);
        assert_eq!(seen.get(), 1);
    }
}
