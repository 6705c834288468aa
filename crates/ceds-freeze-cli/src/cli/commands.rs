use super::CliError;
use super::helpers::{load_parameters, render_summary};
use ceds_freeze_core::{RunSummary, calc_all_emissions, freeze_all_species};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct RunArgs {
    /// Run configuration file (JSON)
    #[arg(short, long)]
    pub(super) config: PathBuf,

    /// Write frozen-EF percent-change diagnostics alongside the outputs
    #[arg(long)]
    pub(super) diagnostics: bool,
}

pub(super) fn run_freeze_command(args: RunArgs) -> Result<i32, CliError> {
    let params = load_parameters(&args)?;
    let summary = freeze_all_species(&params).map_err(CliError::Engine)?;
    finish(summary)
}

pub(super) fn run_calc_command(args: RunArgs) -> Result<i32, CliError> {
    let params = load_parameters(&args)?;
    let summary = calc_all_emissions(&params).map_err(CliError::Engine)?;
    finish(summary)
}

pub(super) fn run_all_command(args: RunArgs) -> Result<i32, CliError> {
    let params = load_parameters(&args)?;
    let mut summary = freeze_all_species(&params).map_err(CliError::Engine)?;
    summary.merge(calc_all_emissions(&params).map_err(CliError::Engine)?);
    finish(summary)
}

fn finish(summary: RunSummary) -> Result<i32, CliError> {
    print!("{}", render_summary(&summary));
    Ok(if summary.failures.is_empty() { 0 } else { 1 })
}
