#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod batch;
mod service;

#[cfg(test)]
mod tests;

pub use batch::BatchLookup;
pub use service::BookService;
