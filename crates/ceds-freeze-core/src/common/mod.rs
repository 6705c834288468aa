pub mod config;
pub mod sectors;

pub use config::{FreezeParameters, IsoFilter};
pub use sectors::{COMBUSTION_SECTORS, is_combustion_sector};
