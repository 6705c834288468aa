//! Engine for freezing CEDS emission factors and recomputing frozen total
//! emissions.
//!
//! The pipeline per species: load the EF table, flag statistical outliers
//! in each combustion (sector, fuel) slice at the freeze year, repair them
//! with the slice median, carry the freeze-year value forward through
//! every later year, reconcile the frozen combustion rows back into the
//! full table, and persist it. A second pass pairs each frozen EF table
//! with its activity table and writes total emissions as the element-wise
//! product.

pub mod common;
pub mod domain;
pub mod modules;

pub use common::{FreezeParameters, IsoFilter};
pub use domain::{FreezeError, FreezeErrorCategory, FreezeResult, RunSummary};
pub use modules::{calc_all_emissions, freeze_all_species};
