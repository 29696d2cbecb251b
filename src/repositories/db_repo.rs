#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::BookRepository;
use crate::{Book, BookId, RepositoryError, RepositoryResult};
use sqlx::{Connection, PgConnection};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, warn};
use url::Url;

const ALL_BOOKS_SQL: &str = "SELECT name FROM book";
const BOOK_BY_ID_SQL: &str = "SELECT name FROM book WHERE id = $1";

/// Relational access primitive: runs one query on a fresh connection and
/// returns the first column of every row.
pub trait SqlDriver {
    /// # Errors
    /// Returns the driver's native error on connection or query failure.
    fn fetch_column(
        &self,
        connection: &str,
        sql: &str,
        params: &[&str],
    ) -> Result<Vec<String>, sqlx::Error>;
}

/// Postgres driver backed by sqlx. Blocks the calling thread on a private
/// current-thread runtime.
pub struct PgDriver {
    runtime: Runtime,
}

impl PgDriver {
    /// # Errors
    /// Returns an error if the tokio runtime cannot be built.
    pub fn new() -> std::io::Result<Self> {
        Builder::new_current_thread()
            .enable_all()
            .build()
            .map(|runtime| Self { runtime })
    }
}

impl SqlDriver for PgDriver {
    fn fetch_column(
        &self,
        connection: &str,
        sql: &str,
        params: &[&str],
    ) -> Result<Vec<String>, sqlx::Error> {
        self.runtime.block_on(async {
            let mut conn = PgConnection::connect(connection).await?;
            let query = params
                .iter()
                .fold(sqlx::query_scalar::<sqlx::Postgres, String>(sql), |query, param| {
                    query.bind(*param)
                });
            let rows = query.fetch_all(&mut conn).await;
            if let Err(e) = conn.close().await {
                warn!("closing connection to {}: {e}", redacted(connection));
            }
            rows
        })
    }
}

impl std::fmt::Debug for PgDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgDriver").finish_non_exhaustive()
    }
}

/// Books read from a `book` table through a [`SqlDriver`].
#[derive(Debug)]
pub struct DbBookRepository<D = PgDriver> {
    driver: D,
    connection: String,
}

impl<D: SqlDriver> DbBookRepository<D> {
    #[must_use]
    pub fn new(driver: D, connection: impl Into<String>) -> Self {
        Self {
            driver,
            connection: connection.into(),
        }
    }

    #[must_use]
    pub fn connection(&self) -> &str {
        &self.connection
    }
}

impl<D: SqlDriver> BookRepository for DbBookRepository<D> {
    fn fetch_all(&self) -> RepositoryResult<Vec<Book>> {
        debug!(source_url = %redacted(&self.connection), "{ALL_BOOKS_SQL}");
        self.driver
            .fetch_column(&self.connection, ALL_BOOKS_SQL, &[])
            .map(|names| names.into_iter().map(Book::new).collect())
            .map_err(|e| {
                warn!("db fetch_all: {e}");
                RepositoryError::fetch_all(e)
            })
    }

    fn fetch_by_id(&self, id: &BookId) -> RepositoryResult<Option<Book>> {
        debug!(source_url = %redacted(&self.connection), book_id = %id, "{BOOK_BY_ID_SQL}");
        self.driver
            .fetch_column(&self.connection, BOOK_BY_ID_SQL, &[id.value()])
            .map(|names| names.into_iter().next().map(Book::new))
            .map_err(|e| {
                warn!(book_id = %id, "db fetch_by_id: {e}");
                RepositoryError::fetch_by_id(e)
            })
    }
}

/// Connection string with any password masked, for log output.
fn redacted(connection: &str) -> String {
    Url::parse(connection).map_or_else(
        |_| "<unparseable connection string>".to_string(),
        |mut url| {
            if url.password().is_some() {
                let _ = url.set_password(Some("***"));
            }
            url.to_string()
        },
    )
}
