pub mod book_service;
pub mod domain;
pub mod error;
pub mod repositories;

pub use book_service::{BatchLookup, BookService};
pub use domain::{Book, BookId};
pub use error::{
    cause_chain, get_error_info, AccessError, AppError, RepositoryError, RepositoryResult, Result,
    ServiceError, ServiceResult,
};
pub use repositories::{
    BookRepository, DbBookRepository, DocumentBookRepository, PgDriver, SqlDriver,
};
