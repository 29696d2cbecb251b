#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use super::action::{CliAction, CliCommand};
use super::suggest_commands;
use books::{AppError, BookId};
use itertools::Itertools;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error("Missing required argument: {}", arg)]
    MissingRequiredArg { arg: String },
    #[error("Unknown command: {}{}", cmd, did_you_mean(suggestions))]
    UnknownCommand {
        cmd: String,
        suggestions: Vec<String>,
    },
    #[error("Unexpected argument: {}", arg)]
    UnexpectedArg { arg: String },
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.iter().join(", "))
    }
}

impl From<CliError> for AppError {
    fn from(error: CliError) -> Self {
        Self::Usage(error.to_string())
    }
}

/// Parses the arguments after the program name.
pub fn parse_cli_args(args: &[String]) -> Result<CliAction, CliError> {
    let (config, rest) = split_config_flag(args)?;

    match rest.first().map(String::as_str) {
        None | Some("-h" | "--help" | "help") => Ok(CliAction::ShowHelp),
        Some("-v" | "--version") => Ok(CliAction::ShowVersion),
        Some("all") => {
            ensure_no_extra_args(&rest[1..])?;
            Ok(CliAction::Command {
                config,
                command: CliCommand::All,
            })
        }
        Some("get") => {
            let id = rest
                .get(1)
                .filter(|value| !value.starts_with("--"))
                .ok_or_else(|| CliError::MissingRequiredArg {
                    arg: "id".to_string(),
                })?;
            ensure_no_extra_args(&rest[2..])?;
            Ok(CliAction::Command {
                config,
                command: CliCommand::Get {
                    id: BookId::new(id.as_str()),
                },
            })
        }
        Some("batch") => {
            let ids: Vec<BookId> = rest[1..].iter().map(|id| BookId::new(id.as_str())).collect();
            if ids.is_empty() {
                return Err(CliError::MissingRequiredArg {
                    arg: "id".to_string(),
                });
            }
            Ok(CliAction::Command {
                config,
                command: CliCommand::Batch { ids },
            })
        }
        Some(cmd) => Err(CliError::UnknownCommand {
            cmd: cmd.to_string(),
            suggestions: suggest_commands(cmd),
        }),
    }
}

/// Pulls `--config <path>` (or `-c <path>`) out of the argument list.
fn split_config_flag(args: &[String]) -> Result<(Option<PathBuf>, Vec<String>), CliError> {
    let Some(position) = args
        .iter()
        .position(|a| matches!(a.as_str(), "--config" | "-c"))
    else {
        return Ok((None, args.to_vec()));
    };

    let Some(raw_value) = args.get(position + 1).filter(|v| !v.starts_with('-')) else {
        return Err(CliError::MissingRequiredArg {
            arg: "config".to_string(),
        });
    };

    let rest = args
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != position && *i != position + 1)
        .map(|(_, a)| a.clone())
        .collect();
    Ok((Some(PathBuf::from(raw_value)), rest))
}

fn ensure_no_extra_args(extra: &[String]) -> Result<(), CliError> {
    extra.first().map_or(Ok(()), |arg| {
        Err(CliError::UnexpectedArg { arg: arg.clone() })
    })
}
