//! Repair and carry-forward freezing of the combustion subgrid.
//!
//! Both operations mutate only the subgrid; rows outside it are never
//! touched. The reconciler writes the result back into the full table.

use crate::domain::{FreezeError, FreezeResult};
use crate::modules::outliers::OutlierRecord;
use crate::modules::table::CombustionSubgrid;

/// Overwrite each flagged cell with the slice median. A row is only
/// touched when it still holds the exact value that triggered the flag, so
/// running repair twice cannot re-apply a replacement.
pub fn repair_outliers(
    subgrid: &mut CombustionSubgrid,
    sector: &str,
    fuel: &str,
    year: i32,
    median: f64,
    outliers: &[OutlierRecord],
) {
    let Some(year_index) = subgrid.year_index(year) else {
        return;
    };

    for record in outliers {
        for row in &mut subgrid.rows {
            if row.iso == record.iso
                && row.sector == sector
                && row.fuel == fuel
                && row.values[year_index] == record.value
            {
                row.values[year_index] = median;
            }
        }
    }
}

/// Carry each row's freeze-year value forward through every later year.
/// Fails before touching any row when the freeze year lies outside the
/// table's year range.
pub fn freeze_subgrid(subgrid: &mut CombustionSubgrid, freeze_year: i32) -> FreezeResult<()> {
    let year_index = subgrid.year_index(freeze_year).ok_or_else(|| {
        FreezeError::configuration(
            "CONFIG.FREEZE_YEAR_RANGE",
            format!(
                "freeze year {} lies outside the table year range [{}, {}]",
                freeze_year, subgrid.year_first, subgrid.year_last
            ),
        )
    })?;

    for row in &mut subgrid.rows {
        let frozen = row.values[year_index];
        for value in &mut row.values[year_index + 1..] {
            *value = frozen;
        }
    }
    Ok(())
}
