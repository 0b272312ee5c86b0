use std::collections::HashSet;

use crate::error::PlotError;

use super::model::{CellValue, Column, Table};

/// Measurement columns plotted when none are requested explicitly.
pub const DEFAULT_MEASUREMENTS: &[&str] = &["time_stepping_total", "momentum_total"];

/// Position of the column used when no candidate measurement is present.
const FALLBACK_COLUMN: usize = 2;

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// Keep the candidates present in `table`, in candidate order.
///
/// If none survive, fall back to the third column of the table.
pub fn select_measurements(table: &Table, candidates: &[String]) -> Result<Vec<String>, PlotError> {
    let mut selected = Vec::new();
    for name in candidates {
        if table.has_column(name) {
            selected.push(name.clone());
        } else {
            log::warn!("Selected column {name} not present");
        }
    }

    if selected.is_empty() {
        let fallback = table
            .column_at(FALLBACK_COLUMN)
            .ok_or_else(|| PlotError::NoMeasurementColumn {
                candidates: candidates.to_vec(),
                columns: table.column_names().len(),
            })?;
        log::warn!("Falling back to column {}", fallback.name);
        selected.push(fallback.name.clone());
    }
    Ok(selected)
}

// ---------------------------------------------------------------------------
// Row grouping
// ---------------------------------------------------------------------------

/// Distinct non-null values of a column in first-seen order.
pub fn distinct_values(column: &Column) -> Vec<CellValue> {
    let mut seen = HashSet::new();
    column
        .values
        .iter()
        .filter(|v| !v.is_null())
        .filter(|v| seen.insert(*v))
        .cloned()
        .collect()
}

/// Indices of rows whose cell in `column` equals `value`, in row order.
pub fn rows_matching(column: &Column, value: &CellValue) -> Vec<usize> {
    column
        .values
        .iter()
        .enumerate()
        .filter(|(_, v)| *v == value)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_present_candidates_in_declared_order() {
        let table = read_csv("build,scale,momentum_total,time_stepping_total\nA,1,2,3\n".as_bytes()).unwrap();
        let selected = select_measurements(
            &table,
            &candidates(&["time_stepping_total", "bcs_total", "momentum_total"]),
        )
        .unwrap();
        assert_eq!(selected, vec!["time_stepping_total", "momentum_total"]);
    }

    #[test]
    fn falls_back_to_third_column() {
        let table = read_csv("build,scale,runtime,other\nA,1,2,3\n".as_bytes()).unwrap();
        let selected = select_measurements(&table, &candidates(DEFAULT_MEASUREMENTS)).unwrap();
        assert_eq!(selected, vec!["runtime"]);
    }

    #[test]
    fn narrow_table_without_candidates_is_an_error() {
        let table = read_csv("build,scale\nA,1\n".as_bytes()).unwrap();
        let err = select_measurements(&table, &candidates(DEFAULT_MEASUREMENTS)).unwrap_err();
        assert!(matches!(err, PlotError::NoMeasurementColumn { columns: 2, .. }));
    }

    #[test]
    fn distinct_values_keep_first_seen_order_and_skip_null() {
        let table = read_csv("build,n\nB,1\nA,2\n,3\nB,4\nC,5\nA,6\n".as_bytes()).unwrap();
        let builds: Vec<String> = distinct_values(table.column("build").unwrap())
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(builds, vec!["B", "A", "C"]);
    }

    #[test]
    fn rows_matching_preserves_row_order() {
        let table = read_csv("build\nA\nB\nA\nA\n".as_bytes()).unwrap();
        let rows = rows_matching(
            table.column("build").unwrap(),
            &CellValue::String("A".into()),
        );
        assert_eq!(rows, vec![0, 2, 3]);
    }
}
