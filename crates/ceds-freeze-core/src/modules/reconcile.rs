//! Write-back of the frozen combustion subgrid into the full EF table.
//!
//! This is a value-level replacement by stored row index: column order,
//! metadata fields, and every row outside the subgrid are untouched, and
//! the original row order is preserved by construction.

use crate::domain::{FreezeError, FreezeResult};
use crate::modules::table::{CombustionSubgrid, EfTable};

pub fn reconcile(table: &mut EfTable, subgrid: &CombustionSubgrid) -> FreezeResult<()> {
    let table_rows = table.rows.len();
    for (index, frozen_row) in subgrid.indices.iter().zip(&subgrid.rows) {
        let target = table.rows.get_mut(*index).ok_or_else(|| {
            FreezeError::internal(
                "INTERNAL.RECONCILE_INDEX",
                format!(
                    "subgrid row index {} is outside the table ({} rows)",
                    index, table_rows
                ),
            )
        })?;

        if target.key() != frozen_row.key() {
            return Err(FreezeError::internal(
                "INTERNAL.RECONCILE_KEY",
                format!(
                    "row {} key {:?} no longer matches subgrid key {:?}",
                    index,
                    target.key(),
                    frozen_row.key()
                ),
            ));
        }

        target.values = frozen_row.values.clone();
    }
    Ok(())
}
