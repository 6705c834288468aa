//! Percent-change diagnostics for frozen emission factors.
//!
//! Quantifies how much outlier repair moved the freeze-year EFs relative
//! to the control (pre-freeze) table. A one-way observer of the engine's
//! outputs; nothing downstream reads these files.

use crate::domain::{FreezeError, FreezeResult};
use crate::modules::table::{EfTable, year_column_name};
use std::fs;
use std::path::{Path, PathBuf};

/// Percentage change between an old and a new value, as a decimal number.
/// NaN in either input propagates; a zero old value yields an infinity.
pub fn percent_change(old: f64, new: f64) -> f64 {
    (new - old) / old
}

/// Write `{species}_frozen_ef_pchange.csv` under `<out_dir>/diagnostic/`,
/// holding the per-row percent change of the given year column between the
/// control and frozen tables.
pub fn write_percent_change(
    control: &EfTable,
    frozen: &EfTable,
    year: i32,
    species: &str,
    out_dir: &Path,
) -> FreezeResult<PathBuf> {
    if !control.meta_matches(frozen) {
        return Err(FreezeError::internal(
            "INTERNAL.DIAGNOSTIC_META",
            "control and frozen tables disagree on metadata rows",
        ));
    }
    let year_index = control.year_index(year).ok_or_else(|| {
        FreezeError::internal(
            "INTERNAL.DIAGNOSTIC_YEAR",
            format!(
                "year {} is outside the control table range [{}, {}]",
                year, control.year_first, control.year_last
            ),
        )
    })?;

    let mut out = format!("iso,sector,fuel,units,{}\n", year_column_name(year));
    for (control_row, frozen_row) in control.rows.iter().zip(&frozen.rows) {
        let change = percent_change(
            control_row.values[year_index],
            frozen_row.values[year_index],
        );
        let rendered = if change.is_nan() {
            "NA".to_string()
        } else {
            format!("{}", change)
        };
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            control_row.iso, control_row.sector, control_row.fuel, control_row.units, rendered
        ));
    }

    let dir = out_dir.join("diagnostic");
    fs::create_dir_all(&dir).map_err(|source| {
        FreezeError::io_system(
            "IO.DIAGNOSTIC_WRITE",
            format!(
                "failed to create diagnostic directory '{}': {}",
                dir.display(),
                source
            ),
        )
    })?;
    let path = dir.join(format!("{}_frozen_ef_pchange.csv", species));
    fs::write(&path, out).map_err(|source| {
        FreezeError::io_system(
            "IO.DIAGNOSTIC_WRITE",
            format!("failed to write '{}': {}", path.display(), source),
        )
    })?;
    Ok(path)
}
