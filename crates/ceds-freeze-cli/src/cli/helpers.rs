use super::CliError;
use super::commands::RunArgs;
use ceds_freeze_core::{FreezeParameters, RunSummary};
use std::fmt::Write as _;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Honors `RUST_LOG`; defaults to
/// `info` so per-species progress is visible. Logs go to stderr, keeping
/// stdout to the run summary.
pub(super) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub(super) fn load_parameters(args: &RunArgs) -> Result<FreezeParameters, CliError> {
    let params = FreezeParameters::from_file(&args.config).map_err(CliError::Engine)?;
    Ok(if args.diagnostics {
        params.with_diagnostics(true)
    } else {
        params
    })
}

pub(super) fn render_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    for path in &summary.written {
        let _ = writeln!(out, "wrote {}", path.display());
    }
    if summary.failures.is_empty() {
        let _ = writeln!(out, "{} file(s) written, all species succeeded", summary.written.len());
    } else {
        for failure in &summary.failures {
            let _ = writeln!(
                out,
                "FAILED {} at {}: {}",
                failure.species, failure.stage, failure.error
            );
        }
        let _ = writeln!(
            out,
            "{} file(s) written, {} species failed",
            summary.written.len(),
            summary.failures.len()
        );
    }
    out
}
