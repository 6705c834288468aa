//! Run orchestration: the per-species freeze and emissions loops.
//!
//! Species are processed strictly one after another, and sector/fuel
//! slices strictly one after another within a species, so every slice's
//! statistics see all prior repairs and no partially frozen data.
//! Recoverable failures are caught here, logged with species and stage,
//! and collected into the run summary; configuration and internal
//! failures abort the run.

use crate::common::FreezeParameters;
use crate::domain::{FreezeError, FreezeResult, ProcessStage, RunSummary, SpeciesFailure};
use crate::modules::diagnostics::write_percent_change;
use crate::modules::discovery::{FileKind, discover_species_file, emissions_output_name};
use crate::modules::emissions::calculate_emissions;
use crate::modules::freeze::{freeze_subgrid, repair_outliers};
use crate::modules::outliers::{detect_outliers, slice_median};
use crate::modules::reconcile::reconcile;
use crate::modules::table::{read_table, write_table};
use std::path::PathBuf;
use tracing::{error, info, info_span, warn};

/// Freeze the EF table of every configured species and persist the frozen
/// tables to the output directory under their input file names.
pub fn freeze_all_species(params: &FreezeParameters) -> FreezeResult<RunSummary> {
    let mut summary = RunSummary::default();
    info!(
        freeze_year = params.freeze_year,
        species = params.freeze_species.len(),
        "freezing emission factors"
    );

    for species in &params.freeze_species {
        let span = info_span!("freeze", species = %species);
        let _guard = span.enter();

        match freeze_species(params, species) {
            Ok(path) => {
                info!(output = %path.display(), "frozen EF table written");
                summary.record_output(path);
            }
            Err((stage, error)) => handle_species_error(&mut summary, species, stage, error)?,
        }
    }

    report_failures(&summary);
    Ok(summary)
}

/// Pair each species' frozen EF table with its activity table and write
/// the total-emissions product.
pub fn calc_all_emissions(params: &FreezeParameters) -> FreezeResult<RunSummary> {
    let mut summary = RunSummary::default();
    info!(
        species = params.freeze_species.len(),
        "calculating frozen total emissions"
    );

    for species in &params.freeze_species {
        let span = info_span!("emissions", species = %species);
        let _guard = span.enter();

        match calc_species_emissions(params, species) {
            Ok(path) => {
                info!(output = %path.display(), "total emissions written");
                summary.record_output(path);
            }
            Err((stage, error)) => handle_species_error(&mut summary, species, stage, error)?,
        }
    }

    report_failures(&summary);
    Ok(summary)
}

type StageResult<T> = Result<T, (ProcessStage, FreezeError)>;

fn freeze_species(params: &FreezeParameters, species: &str) -> StageResult<PathBuf> {
    let ef_path = discover_species_file(&params.input_dir, species, FileKind::EmissionFactors)
        .map_err(|error| (ProcessStage::Discovery, error))?;
    info!(input = %ef_path.display(), "loading EF table");

    let mut table = read_table(&ef_path).map_err(|error| (ProcessStage::Load, error))?;
    let control = params.diagnostics.then(|| table.clone());

    let mut subgrid = table.combustion_subgrid(&params.freeze_isos);
    if subgrid.is_empty() {
        warn!("no combustion rows are eligible for freezing");
    }

    for sector in subgrid.sectors() {
        for fuel in subgrid.fuels() {
            if subgrid.slice_positions(&sector, &fuel).is_empty() {
                warn!(%sector, %fuel, "empty sector/fuel slice, skipping detection");
                continue;
            }

            let outliers = detect_outliers(&subgrid, &sector, &fuel, params.freeze_year);
            if outliers.is_empty() {
                continue;
            }

            // slice_median only returns None for all-missing slices, which
            // cannot produce outlier records.
            if let Some(median) = slice_median(&subgrid, &sector, &fuel, params.freeze_year) {
                info!(%sector, %fuel, count = outliers.len(), median, "repairing outliers");
                repair_outliers(
                    &mut subgrid,
                    &sector,
                    &fuel,
                    params.freeze_year,
                    median,
                    &outliers,
                );
            }
        }
    }

    freeze_subgrid(&mut subgrid, params.freeze_year)
        .map_err(|error| (ProcessStage::Freeze, error))?;
    reconcile(&mut table, &subgrid).map_err(|error| (ProcessStage::Reconcile, error))?;

    let file_name = ef_path
        .file_name()
        .map(|name| name.to_owned())
        .unwrap_or_else(|| format!("{}_frozen_EFs.csv", species).into());
    let out_path = params.output_dir.join(file_name);
    write_table(&table, &out_path).map_err(|error| (ProcessStage::Persist, error))?;

    if let Some(control) = control {
        // Diagnostics are observers; a failed write never fails the species.
        match write_percent_change(
            &control,
            &table,
            params.freeze_year,
            species,
            &params.output_dir,
        ) {
            Ok(path) => info!(diagnostic = %path.display(), "percent-change diagnostic written"),
            Err(error) => warn!(%error, "percent-change diagnostic failed"),
        }
    }

    Ok(out_path)
}

fn calc_species_emissions(params: &FreezeParameters, species: &str) -> StageResult<PathBuf> {
    let ef_path = discover_species_file(&params.output_dir, species, FileKind::EmissionFactors)
        .map_err(|error| (ProcessStage::Discovery, error))?;
    let activity_path = discover_species_file(&params.input_dir, species, FileKind::Activity)
        .map_err(|error| (ProcessStage::Discovery, error))?;

    let ef = read_table(&ef_path).map_err(|error| (ProcessStage::Load, error))?;
    let activity = read_table(&activity_path).map_err(|error| (ProcessStage::Load, error))?;

    let emissions =
        calculate_emissions(&ef, &activity).map_err(|error| (ProcessStage::Emissions, error))?;

    let out_path = params.output_dir.join(emissions_output_name(species));
    write_table(&emissions, &out_path).map_err(|error| (ProcessStage::Persist, error))?;
    Ok(out_path)
}

fn handle_species_error(
    summary: &mut RunSummary,
    species: &str,
    stage: ProcessStage,
    error: FreezeError,
) -> FreezeResult<()> {
    if !error.is_species_recoverable() {
        return Err(error);
    }
    error!(%stage, %error, "species failed, continuing with the next one");
    summary.record_failure(SpeciesFailure::new(species, stage, error));
    Ok(())
}

fn report_failures(summary: &RunSummary) {
    for failure in &summary.failures {
        warn!(
            species = %failure.species,
            stage = %failure.stage,
            error = %failure.error,
            "species failed during this run"
        );
    }
}
