use super::model::{EfTable, META_COLUMNS, TableRow, parse_year_column, year_column_name};
use crate::domain::{FreezeError, FreezeResult};
use std::fs;
use std::path::Path;

/// Load a comma-delimited EF or activity table. The header row must start
/// with the four metadata columns followed by contiguous ascending year
/// columns; CEDS fields never contain embedded commas.
pub fn read_table(path: &Path) -> FreezeResult<EfTable> {
    let source = fs::read_to_string(path).map_err(|source| {
        FreezeError::io_system(
            "IO.TABLE_READ",
            format!("failed to read table '{}': {}", path.display(), source),
        )
    })?;
    parse_table(&source)
}

pub fn parse_table(source: &str) -> FreezeResult<EfTable> {
    let mut lines = source.lines().filter(|line| !line.trim().is_empty());
    let header = lines.next().ok_or_else(|| {
        FreezeError::malformed_table("TABLE.EMPTY", "table has no header row")
    })?;

    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    if columns.len() < META_COLUMNS.len() + 1 {
        return Err(FreezeError::malformed_table(
            "TABLE.META_COLUMNS",
            format!(
                "expected metadata columns {:?} plus at least one year column, found {} columns",
                META_COLUMNS,
                columns.len()
            ),
        ));
    }

    for (expected, found) in META_COLUMNS.iter().zip(&columns) {
        if !found.eq_ignore_ascii_case(expected) {
            return Err(FreezeError::malformed_table(
                "TABLE.META_COLUMNS",
                format!("expected metadata column '{}', found '{}'", expected, found),
            ));
        }
    }

    let mut years = Vec::with_capacity(columns.len() - META_COLUMNS.len());
    for name in &columns[META_COLUMNS.len()..] {
        let year = parse_year_column(name).ok_or_else(|| {
            FreezeError::malformed_table(
                "TABLE.YEAR_HEADER",
                format!("unparsable year column header '{}'", name),
            )
        })?;
        years.push(year);
    }

    let year_first = years[0];
    for (offset, year) in years.iter().enumerate() {
        if *year != year_first + offset as i32 {
            return Err(FreezeError::malformed_table(
                "TABLE.YEAR_GAPS",
                format!(
                    "year columns must be contiguous and ascending; found '{}' at position {}",
                    year_column_name(*year),
                    offset
                ),
            ));
        }
    }
    let year_last = year_first + years.len() as i32 - 1;

    let mut rows = Vec::new();
    for (line_number, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != columns.len() {
            return Err(FreezeError::malformed_table(
                "TABLE.ROW_WIDTH",
                format!(
                    "row {} has {} fields, header has {} columns",
                    line_number + 2,
                    fields.len(),
                    columns.len()
                ),
            ));
        }

        let mut values = Vec::with_capacity(years.len());
        for field in &fields[META_COLUMNS.len()..] {
            values.push(parse_value(field).ok_or_else(|| {
                FreezeError::malformed_table(
                    "TABLE.VALUE",
                    format!("row {} has unparsable value '{}'", line_number + 2, field),
                )
            })?);
        }

        rows.push(TableRow {
            iso: fields[0].to_string(),
            sector: fields[1].to_string(),
            fuel: fields[2].to_string(),
            units: fields[3].to_string(),
            values,
        });
    }

    Ok(EfTable {
        year_first,
        year_last,
        rows,
    })
}

/// Serialize back to the input schema: header row, no index column,
/// missing values written as `NA`.
pub fn to_csv_string(table: &EfTable) -> String {
    let mut out = String::new();
    out.push_str(&META_COLUMNS.join(","));
    for year in table.years() {
        out.push(',');
        out.push_str(&year_column_name(year));
    }
    out.push('\n');

    for row in &table.rows {
        out.push_str(&row.iso);
        out.push(',');
        out.push_str(&row.sector);
        out.push(',');
        out.push_str(&row.fuel);
        out.push(',');
        out.push_str(&row.units);
        for value in &row.values {
            out.push(',');
            out.push_str(&format_value(*value));
        }
        out.push('\n');
    }
    out
}

pub fn write_table(table: &EfTable, path: &Path) -> FreezeResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| {
            FreezeError::io_system(
                "IO.TABLE_WRITE",
                format!(
                    "failed to create output directory '{}': {}",
                    parent.display(),
                    source
                ),
            )
        })?;
    }
    fs::write(path, to_csv_string(table)).map_err(|source| {
        FreezeError::io_system(
            "IO.TABLE_WRITE",
            format!("failed to write table '{}': {}", path.display(), source),
        )
    })
}

fn parse_value(field: &str) -> Option<f64> {
    if field.is_empty() || field.eq_ignore_ascii_case("na") || field.eq_ignore_ascii_case("nan") {
        return Some(f64::NAN);
    }
    field.parse().ok()
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NA".to_string()
    } else {
        format!("{}", value)
    }
}
