//! Relata - related-content relevance engine CLI
//!
//! Imports CMS content snapshots into a local store, ranks every published
//! item against the rest, and persists the top related items per item.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use relata_core::error::{ExitCode as RelataExitCode, RelataError};
use relata_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // clap fails before `Cli.format` exists, so look at argv for a JSON request
        Err(err) if argv_requests_json() && !is_informational(&err) => {
            let error = usage_error_from_clap(&err);
            eprintln!("{}", error.to_json());
            return exit_with(&error);
        }
        Err(err) => err.exit(),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::from(RelataExitCode::Success as u8),
        Err(e) => {
            report_error(&cli, &e);
            exit_with(&e)
        }
    }
}

fn report_error(cli: &Cli, error: &RelataError) {
    tracing::debug!(error_type = error.error_type(), "command failed");

    if cli.format == OutputFormat::Json {
        eprintln!("{}", error.to_json());
    } else if !cli.quiet {
        eprintln!("error: {}", error);
    }
}

fn exit_with(error: &RelataError) -> ExitCode {
    ExitCode::from(error.exit_code() as u8)
}

/// Help and version requests exit through clap in every format
fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

fn usage_error_from_clap(err: &clap::Error) -> RelataError {
    match err.kind() {
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::ArgumentConflict
        | ErrorKind::TooManyValues
        | ErrorKind::WrongNumberOfValues => RelataError::UsageError(err.to_string()),
        _ => RelataError::Other(err.to_string()),
    }
}

fn argv_requests_json() -> bool {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format=json" => return true,
            "--format" if args.next().as_deref() == Some("json") => return true,
            _ => {}
        }
    }
    false
}
