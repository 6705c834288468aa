pub mod diagnostics;
pub mod discovery;
pub mod emissions;
pub mod freeze;
pub mod outliers;
pub mod reconcile;
pub mod run;
pub mod table;

pub use run::{calc_all_emissions, freeze_all_species};
