use crate::common::{IsoFilter, is_combustion_sector};

/// Year columns are named with a fixed prefix character followed by the
/// 4-digit year, e.g. `X1970`. The engine generates and parses these names
/// rather than assuming any particular set exists in a file.
pub const YEAR_COLUMN_PREFIX: char = 'X';

pub const META_COLUMNS: [&str; 4] = ["iso", "sector", "fuel", "units"];

pub fn year_column_name(year: i32) -> String {
    format!("{}{}", YEAR_COLUMN_PREFIX, year)
}

pub fn parse_year_column(name: &str) -> Option<i32> {
    let digits = name.strip_prefix(YEAR_COLUMN_PREFIX)?;
    if digits.len() != 4 || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// One table row: the (iso, sector, fuel) key, its units, and one value per
/// year column. Missing values are carried as NaN.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub iso: String,
    pub sector: String,
    pub fuel: String,
    pub units: String,
    pub values: Vec<f64>,
}

impl TableRow {
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.iso, &self.sector, &self.fuel)
    }
}

/// In-memory EF or activity table: metadata columns plus a contiguous,
/// ascending year-column range `[year_first, year_last]`. Row order is the
/// file order and is preserved through every transformation.
#[derive(Debug, Clone)]
pub struct EfTable {
    pub year_first: i32,
    pub year_last: i32,
    pub rows: Vec<TableRow>,
}

impl EfTable {
    pub fn year_count(&self) -> usize {
        (self.year_last - self.year_first + 1) as usize
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.year_first..=self.year_last
    }

    /// Index of a year's column within each row's value vector.
    pub fn year_index(&self, year: i32) -> Option<usize> {
        (self.year_first..=self.year_last)
            .contains(&year)
            .then(|| (year - self.year_first) as usize)
    }

    /// Whether the metadata columns of `other` are identical to this
    /// table's, row for row and in the same order.
    pub fn meta_matches(&self, other: &EfTable) -> bool {
        self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(a, b)| a.key() == b.key() && a.units == b.units)
    }

    /// Extract the combustion-eligible rows: combustion sector and an iso
    /// accepted by the freeze filter. The subgrid owns copies of the rows
    /// and remembers their original indices so the reconciler can write
    /// them back positionally.
    pub fn combustion_subgrid(&self, isos: &IsoFilter) -> CombustionSubgrid {
        let mut indices = Vec::new();
        let mut rows = Vec::new();
        for (index, row) in self.rows.iter().enumerate() {
            if is_combustion_sector(&row.sector) && isos.accepts(&row.iso) {
                indices.push(index);
                rows.push(row.clone());
            }
        }
        CombustionSubgrid {
            year_first: self.year_first,
            year_last: self.year_last,
            indices,
            rows,
        }
    }
}

/// The combustion partition of an [`EfTable`], carrying the parent row
/// indices of every row it holds.
#[derive(Debug, Clone)]
pub struct CombustionSubgrid {
    pub year_first: i32,
    pub year_last: i32,
    pub indices: Vec<usize>,
    pub rows: Vec<TableRow>,
}

impl CombustionSubgrid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn year_index(&self, year: i32) -> Option<usize> {
        (self.year_first..=self.year_last)
            .contains(&year)
            .then(|| (year - self.year_first) as usize)
    }

    /// Distinct sectors in first-appearance order.
    pub fn sectors(&self) -> Vec<String> {
        distinct(self.rows.iter().map(|row| row.sector.as_str()))
    }

    /// Distinct fuels in first-appearance order.
    pub fn fuels(&self) -> Vec<String> {
        distinct(self.rows.iter().map(|row| row.fuel.as_str()))
    }

    /// Positions (within the subgrid) of rows belonging to one
    /// (sector, fuel) slice.
    pub fn slice_positions(&self, sector: &str, fuel: &str) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.sector == sector && row.fuel == fuel)
            .map(|(position, _)| position)
            .collect()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.iter().any(|known: &String| known == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
