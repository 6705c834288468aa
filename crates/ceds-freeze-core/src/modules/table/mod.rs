//! Typed in-memory model of CEDS EF and activity tables plus their
//! comma-delimited load/store format.

mod model;
mod parser;

pub use model::{
    CombustionSubgrid, EfTable, META_COLUMNS, TableRow, YEAR_COLUMN_PREFIX, parse_year_column,
    year_column_name,
};
pub use parser::{parse_table, read_table, to_csv_string, write_table};
