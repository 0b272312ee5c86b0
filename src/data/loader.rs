use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::model::{CellValue, Column, Table};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every file in order and stack them into one table.
///
/// Row order follows the order of `paths`. Fails on the first malformed file.
pub fn load_all(paths: &[PathBuf]) -> Result<Table> {
    let mut combined = Table::default();
    for path in paths {
        let table = load_csv(path).with_context(|| format!("loading {}", path.display()))?;
        log::debug!("{}: {} rows", path.display(), table.len());
        combined.append(table);
    }
    log::info!(
        "Loaded {} rows with columns {:?} from {} file(s)",
        combined.len(),
        combined.column_names(),
        paths.len()
    );
    Ok(combined)
}

/// Load a single CSV file. The first row is the header.
pub fn load_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Parse CSV from any reader. Record lengths must match the header.
pub fn read_csv<R: Read>(input: R) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        for (col_idx, value) in record.iter().enumerate() {
            raw[col_idx].push(value.trim().to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| Column::new(name, infer_column(&cells)))
        .collect();

    Table::from_columns(columns).context("CSV columns have unequal lengths")
}

// ---------------------------------------------------------------------------
// Type inference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

/// Pick one type for a whole column, like a dataframe reader does.
/// Empty cells never influence the choice and always become `Null`.
fn infer_column(cells: &[String]) -> Vec<CellValue> {
    let present = || cells.iter().filter(|s| !s.is_empty());

    let kind = if present().all(|s| s.parse::<i64>().is_ok()) {
        ColumnKind::Integer
    } else if present().all(|s| s.parse::<f64>().is_ok()) {
        ColumnKind::Float
    } else if present().all(|s| parse_bool(s).is_some()) {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    };

    cells.iter().map(|s| convert(s, kind)).collect()
}

fn convert(s: &str, kind: ColumnKind) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    let value = match kind {
        ColumnKind::Integer => s.parse().ok().map(CellValue::Integer),
        ColumnKind::Float => s.parse().ok().map(CellValue::Float),
        ColumnKind::Bool => parse_bool(s).map(CellValue::Bool),
        ColumnKind::Text => None,
    };
    value.unwrap_or_else(|| CellValue::String(s.to_string()))
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn columns_are_typed_as_a_whole() {
        let csv = "build,scale,time,ok\nA,1,0.5,true\nB,2,3,False\n";
        let table = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column("build").unwrap().values,
            vec![CellValue::String("A".into()), CellValue::String("B".into())]
        );
        assert_eq!(
            table.column("scale").unwrap().values,
            vec![CellValue::Integer(1), CellValue::Integer(2)]
        );
        // "3" in a float column stays a float
        assert_eq!(
            table.column("time").unwrap().values,
            vec![CellValue::Float(0.5), CellValue::Float(3.0)]
        );
        assert_eq!(
            table.column("ok").unwrap().values,
            vec![CellValue::Bool(true), CellValue::Bool(false)]
        );
    }

    #[test]
    fn empty_cells_become_null() {
        let table = read_csv("a,b\n1,\n,x\n".as_bytes()).unwrap();
        assert_eq!(
            table.column("a").unwrap().values,
            vec![CellValue::Integer(1), CellValue::Null]
        );
        assert_eq!(
            table.column("b").unwrap().values,
            vec![CellValue::Null, CellValue::String("x".into())]
        );
    }

    #[test]
    fn ragged_rows_are_an_error() {
        assert!(read_csv("a,b\n1,2,3\n".as_bytes()).is_err());
    }

    #[test]
    fn header_only_file_gives_empty_table() {
        let table = read_csv("build,scale\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_names(), vec!["build", "scale"]);
    }

    #[test]
    fn load_all_stacks_rows_in_path_order() {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for (name, build) in [("a.csv", "A"), ("b.csv", "B"), ("c.csv", "C")] {
            let path = dir.path().join(name);
            fs::write(&path, format!("build,scale,time_stepping_total\n{build},1,0.5\n")).unwrap();
            paths.push(path);
        }

        let table = load_all(&paths).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.column_names(),
            vec!["build", "scale", "time_stepping_total"]
        );
        let builds: Vec<String> = table
            .column("build")
            .unwrap()
            .values
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(builds, vec!["A", "B", "C"]);
    }

    #[test]
    fn load_all_names_the_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "a,b\n1\n").unwrap();

        let err = load_all(&[path]).unwrap_err();
        assert!(format!("{err:#}").contains("bad.csv"));
    }
}
