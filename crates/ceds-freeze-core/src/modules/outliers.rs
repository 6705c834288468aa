//! Statistical outlier detection over one (sector, fuel) slice of the
//! combustion subgrid.
//!
//! Detection is a pure function over the slice: it never mutates the
//! table. The repair target (the slice median) is computed independently
//! of the test moments so that the replacement value stays robust to the
//! very outliers being detected.
//!
//! Each value is scored against the population mean and standard deviation
//! of the *remaining* values in the slice (the deleted z-score). Scoring a
//! value against moments that include it caps |z| at (n-1)/sqrt(n), which
//! would make the 3.0 cutoff unreachable in small slices; excluding the
//! candidate keeps the conventional cutoff meaningful at every slice size.

use crate::modules::table::CombustionSubgrid;

pub const ZSCORE_THRESHOLD: f64 = 3.0;

/// Detection needs at least this many non-missing values: the remaining
/// slice must still have two values for a spread to exist.
const MIN_SLICE_VALUES: usize = 3;

/// One flagged cell: the region code and the value that triggered the
/// flag. Transient; consumed immediately by the repair step.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierRecord {
    pub iso: String,
    pub value: f64,
}

/// Flag outliers in the given year column of one (sector, fuel) slice.
/// Returns records in slice row order. Empty or degenerate slices yield an
/// empty sequence without computing any statistics.
pub fn detect_outliers(
    subgrid: &CombustionSubgrid,
    sector: &str,
    fuel: &str,
    year: i32,
) -> Vec<OutlierRecord> {
    let Some(year_index) = subgrid.year_index(year) else {
        return Vec::new();
    };

    let slice: Vec<(&str, f64)> = subgrid
        .slice_positions(sector, fuel)
        .into_iter()
        .map(|position| &subgrid.rows[position])
        .filter(|row| row.values[year_index].is_finite())
        .map(|row| (row.iso.as_str(), row.values[year_index]))
        .collect();

    if slice.len() < MIN_SLICE_VALUES {
        return Vec::new();
    }

    let mut outliers = Vec::new();
    for (position, (iso, value)) in slice.iter().enumerate() {
        let rest: Vec<f64> = slice
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != position)
            .map(|(_, (_, other_value))| *other_value)
            .collect();

        if is_outlier(*value, &rest) {
            outliers.push(OutlierRecord {
                iso: iso.to_string(),
                value: *value,
            });
        }
    }
    outliers
}

/// Median of the slice's non-missing values in the given year column; the
/// repair target. None when the slice has no non-missing values.
pub fn slice_median(
    subgrid: &CombustionSubgrid,
    sector: &str,
    fuel: &str,
    year: i32,
) -> Option<f64> {
    let year_index = subgrid.year_index(year)?;
    let mut values: Vec<f64> = subgrid
        .slice_positions(sector, fuel)
        .into_iter()
        .map(|position| subgrid.rows[position].values[year_index])
        .filter(|value| value.is_finite())
        .collect();
    if values.is_empty() {
        return None;
    }

    values.sort_by(|a, b| a.total_cmp(b));
    let middle = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[middle])
    } else {
        Some((values[middle - 1] + values[middle]) / 2.0)
    }
}

fn is_outlier(value: f64, rest: &[f64]) -> bool {
    let count = rest.len() as f64;
    let mean = rest.iter().sum::<f64>() / count;
    let variance = rest
        .iter()
        .map(|other| (other - mean) * (other - mean))
        .sum::<f64>()
        / count;
    let std_dev = variance.sqrt();

    if std_dev == 0.0 {
        // The rest of the slice is constant; any departure from it is
        // infinitely many deviations away.
        return value != mean;
    }
    ((value - mean) / std_dev).abs() > ZSCORE_THRESHOLD
}
