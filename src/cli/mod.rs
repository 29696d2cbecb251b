#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod action;
mod args;
mod parser;

pub use action::{CliAction, CliCommand};
pub use args::suggest_commands;
pub use parser::{parse_cli_args, CliError};

pub const HELP_TEXT: &str = "\
Usage: books [--config <path>] <command>

Commands:
  all                 List every book from the primary source
  get <id>            Look up one book by id
  batch <id>...       Look up several books, reporting each failure

Options:
  -c, --config <path> Config file (default: .books/config.toml)
  -h, --help          Show this help
  -v, --version       Show version";
