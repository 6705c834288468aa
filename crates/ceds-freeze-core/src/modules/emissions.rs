//! Total-emissions arithmetic: element-wise EF × activity over the year
//! range shared by both tables.
//!
//! Alignment is established once by the metadata check and then relied on
//! positionally; rows are never re-joined on keys. Missing values
//! propagate: NaN in either factor yields NaN in the product.

use crate::domain::{FreezeError, FreezeResult};
use crate::modules::table::{EfTable, TableRow};

pub fn calculate_emissions(ef: &EfTable, activity: &EfTable) -> FreezeResult<EfTable> {
    verify_alignment(ef, activity)?;

    let shared_first = ef.year_first.max(activity.year_first);
    let shared_last = ef.year_last.min(activity.year_last);
    if shared_first > shared_last {
        return Err(FreezeError::alignment(
            "ALIGN.YEAR_OVERLAP",
            format!(
                "EF years [{}, {}] and activity years [{}, {}] do not overlap",
                ef.year_first, ef.year_last, activity.year_first, activity.year_last
            ),
        ));
    }

    let ef_offset = (shared_first - ef.year_first) as usize;
    let activity_offset = (shared_first - activity.year_first) as usize;
    let shared_count = (shared_last - shared_first + 1) as usize;

    let rows = ef
        .rows
        .iter()
        .zip(&activity.rows)
        .map(|(ef_row, activity_row)| {
            let values = (0..shared_count)
                .map(|offset| {
                    ef_row.values[ef_offset + offset] * activity_row.values[activity_offset + offset]
                })
                .collect();
            TableRow {
                iso: ef_row.iso.clone(),
                sector: ef_row.sector.clone(),
                fuel: ef_row.fuel.clone(),
                units: ef_row.units.clone(),
                values,
            }
        })
        .collect();

    Ok(EfTable {
        year_first: shared_first,
        year_last: shared_last,
        rows,
    })
}

fn verify_alignment(ef: &EfTable, activity: &EfTable) -> FreezeResult<()> {
    if ef.rows.len() != activity.rows.len() {
        return Err(FreezeError::alignment(
            "ALIGN.META_MISMATCH",
            format!(
                "EF table has {} rows, activity table has {}",
                ef.rows.len(),
                activity.rows.len()
            ),
        ));
    }

    for (index, (ef_row, activity_row)) in ef.rows.iter().zip(&activity.rows).enumerate() {
        if ef_row.key() != activity_row.key() || ef_row.units != activity_row.units {
            return Err(FreezeError::alignment(
                "ALIGN.META_MISMATCH",
                format!(
                    "EF and activity metadata disagree at row {}: {:?} vs {:?}",
                    index + 1,
                    ef_row.key(),
                    activity_row.key()
                ),
            ));
        }
    }
    Ok(())
}
