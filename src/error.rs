#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use std::error::Error as StdError;
use thiserror::Error;

/// Error code constants for type-safe error handling
pub mod code {
    pub const CLI_ERROR: &str = "CLI_ERROR";
    pub const INVALID: &str = "INVALID";
    pub const DEPENDENCY: &str = "DEPENDENCY";
    pub const INTERNAL: &str = "INTERNAL";
}

const BOOKS_MESSAGE: &str = "Error when get books";
const BOOK_MESSAGE: &str = "Error when get book";
const SERVICE_BOOKS_MESSAGE: &str = "Error from service when get books";
const SERVICE_BOOK_MESSAGE: &str = "Error from service when get book";
const BOOKS_CLIENT_MESSAGE: &str = "Error when get books, please try later";
const BOOK_CLIENT_MESSAGE: &str = "Error when get book, please try later";

/// Native failure of a data-access collaborator. Never handed to callers
/// directly, only as the root of a [`RepositoryError`].
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Malformed document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Database driver error: {0}")]
    Driver(#[from] sqlx::Error),
}

impl AccessError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Parse(_) => code::INVALID,
            Self::Driver(_) => code::DEPENDENCY,
        }
    }
}

#[derive(Error, Debug)]
#[error("{message}")]
pub struct RepositoryError {
    message: &'static str,
    client_message: &'static str,
    #[source]
    cause: AccessError,
}

impl RepositoryError {
    #[must_use]
    pub fn fetch_all(cause: impl Into<AccessError>) -> Self {
        Self {
            message: BOOKS_MESSAGE,
            client_message: BOOKS_CLIENT_MESSAGE,
            cause: cause.into(),
        }
    }

    #[must_use]
    pub fn fetch_by_id(cause: impl Into<AccessError>) -> Self {
        Self {
            message: BOOK_MESSAGE,
            client_message: BOOK_CLIENT_MESSAGE,
            cause: cause.into(),
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    #[must_use]
    pub const fn client_message(&self) -> &'static str {
        self.client_message
    }

    #[must_use]
    pub const fn cause(&self) -> &AccessError {
        &self.cause
    }
}

/// The only error kind a service caller ever sees.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ServiceError {
    message: &'static str,
    client_message: &'static str,
    #[source]
    cause: RepositoryError,
}

impl ServiceError {
    #[must_use]
    pub const fn all_books(cause: RepositoryError) -> Self {
        Self {
            message: SERVICE_BOOKS_MESSAGE,
            client_message: BOOKS_CLIENT_MESSAGE,
            cause,
        }
    }

    #[must_use]
    pub const fn book_by_id(cause: RepositoryError) -> Self {
        Self {
            message: SERVICE_BOOK_MESSAGE,
            client_message: BOOK_CLIENT_MESSAGE,
            cause,
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }

    #[must_use]
    pub const fn client_message(&self) -> &'static str {
        self.client_message
    }

    #[must_use]
    pub const fn cause(&self) -> &RepositoryError {
        &self.cause
    }

    /// Returns the protocol error code of the root cause
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.cause.cause.code()
    }
}

/// Failures of the `books` binary itself, outside the service contract.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// Returns the protocol error code for this error
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Usage(_) => code::CLI_ERROR,
            Self::ConfigError(_) => code::INVALID,
            Self::IoError(_) => code::DEPENDENCY,
            Self::SerializationError(_) => code::INTERNAL,
        }
    }

    /// Returns the exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::ConfigError(_) => 3,
            Self::IoError(_) => 4,
            Self::SerializationError(_) => 5,
        }
    }
}

/// Protocol error codes as documented in the CLI
pub const ERROR_CODES: &[(&str, &str, &str)] = &[
    (
        code::CLI_ERROR,
        "Invalid CLI usage",
        "Run 'books --help' for valid options",
    ),
    (
        code::INVALID,
        "Malformed source payload or configuration",
        "Validate JSON syntax of the books document and config values",
    ),
    (
        code::DEPENDENCY,
        "Data source unavailable",
        "Check the database URL and that the server is reachable",
    ),
    (
        code::INTERNAL,
        "Unexpected internal failure",
        "Inspect logs and retry command",
    ),
];

/// Get error code details (description and fix) for a given error code
#[must_use]
pub fn get_error_info(error_code: &str) -> Option<(&'static str, &'static str)> {
    ERROR_CODES
        .iter()
        .find(|(code, _, _)| *code == error_code)
        .map(|(_, desc, fix)| (*desc, *fix))
}

/// Renders an error and every `source()` below it, outermost first.
#[must_use]
pub fn cause_chain(error: &(dyn StdError + 'static)) -> Vec<String> {
    std::iter::successors(Some(error), |&current| current.source())
        .map(ToString::to_string)
        .collect()
}

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
pub type Result<T> = std::result::Result<T, AppError>;
