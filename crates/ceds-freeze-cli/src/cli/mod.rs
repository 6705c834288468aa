mod commands;
mod helpers;

use ceds_freeze_core::FreezeError;
use clap::Parser;

pub fn run_from_env() -> i32 {
    helpers::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let engine_error = error.as_freeze_error();
            eprintln!("{}", engine_error.diagnostic_line());
            engine_error.exit_code()
        }
    }
}

/// Parse and run a command line without touching process state; exposed
/// for tests.
pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("ceds-freeze".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => dispatch_parsed(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "ceds-freeze",
    about = "CEDS emission-factor freezing and emissions reconstruction"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Repair and freeze the EF tables of every configured species
    Freeze(commands::RunArgs),
    /// Recompute total emissions from frozen EF and activity tables
    Calc(commands::RunArgs),
    /// Freeze, then recompute total emissions, in one run
    All(commands::RunArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Freeze(args) => commands::run_freeze_command(args),
        CliCommand::Calc(args) => commands::run_calc_command(args),
        CliCommand::All(args) => commands::run_all_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Engine(FreezeError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_freeze_error(&self) -> FreezeError {
        match self {
            Self::Usage(message) => {
                FreezeError::configuration("CONFIG.CLI_USAGE", message.clone())
            }
            Self::Engine(error) => error.clone(),
            Self::Internal(error) => FreezeError::internal("INTERNAL.CLI", format!("{error:#}")),
        }
    }
}
