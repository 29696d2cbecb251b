#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod cli;
mod config;

use books::{
    cause_chain, get_error_info, BookRepository, BookService, DbBookRepository,
    DocumentBookRepository, PgDriver, Result, ServiceError,
};
use cli::{parse_cli_args, CliAction, CliCommand, HELP_TEXT};
use config::{load_config, Config, SourceKind};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.code(), "{e}");
            eprintln!("{e}");
            if let Some((_, fix)) = get_error_info(e.code()) {
                eprintln!("hint: {fix}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    match parse_cli_args(args)? {
        CliAction::ShowHelp => println!("{HELP_TEXT}"),
        CliAction::ShowVersion => println!("books {}", env!("CARGO_PKG_VERSION")),
        CliAction::Command { config, command } => {
            let config = load_config(config)?;
            info!(
                primary = ?config.primary,
                secondary = ?config.secondary,
                "Loaded configuration"
            );
            let service = BookService::new(
                build_repository(config.primary, &config)?,
                build_repository(config.secondary, &config)?,
            );
            println!("{}", execute(&service, command)?);
        }
    }
    Ok(())
}

fn build_repository(kind: SourceKind, config: &Config) -> Result<Box<dyn BookRepository>> {
    let repository: Box<dyn BookRepository> = match kind {
        SourceKind::Database => Box::new(DbBookRepository::new(
            PgDriver::new()?,
            config.database_url.clone(),
        )),
        SourceKind::Document => Box::new(document_repository(config.books_file.as_deref())?),
    };
    Ok(repository)
}

fn document_repository(books_file: Option<&Path>) -> Result<DocumentBookRepository> {
    books_file.map_or_else(
        || Ok(DocumentBookRepository::sample()),
        |path| {
            std::fs::read_to_string(path)
                .map(DocumentBookRepository::new)
                .map_err(Into::into)
        },
    )
}

/// Runs one command against the service and renders its JSON output. This is
/// the only place service errors are turned into fallback values.
fn execute<P, S>(service: &BookService<P, S>, command: CliCommand) -> Result<String>
where
    P: BookRepository,
    S: BookRepository,
{
    let rendered = match command {
        CliCommand::All => {
            let books = service.all().unwrap_or_else(|e| {
                report(&e);
                Vec::new()
            });
            serde_json::to_string(&books)?
        }
        CliCommand::Get { id } => {
            let book = service.book_by_id(&id).unwrap_or_else(|e| {
                report(&e);
                None
            });
            serde_json::to_string(&book)?
        }
        CliCommand::Batch { ids } => {
            let lookup = service.books_by_ids(ids);
            lookup.failures().iter().for_each(|(_, e)| report(e));
            let failed: Vec<_> = lookup.failures().iter().map(|(id, _)| id).collect();
            serde_json::to_string(&serde_json::json!({
                "found": lookup.found(),
                "missing": lookup.missing(),
                "failed": failed,
            }))?
        }
    };
    Ok(rendered)
}

fn report(error: &ServiceError) {
    error!(
        code = error.code(),
        chain = %cause_chain(error).join(" <- "),
        "{error}"
    );
    eprintln!("{}", error.client_message());
}
