use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a table column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, typed per column when a file is read.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Hash so distinct build labels can be collected in a HashSet --

impl Eq for CellValue {}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // integral floats keep their decimal point so `1.0` never reads as `1`
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if v.is_finite() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Column – a named vector of cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the combined benchmark results
// ---------------------------------------------------------------------------

/// Column-major table. Every column holds exactly `row_count` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from columns of equal length.
    ///
    /// Returns `None` if the column lengths disagree.
    pub fn from_columns(columns: Vec<Column>) -> Option<Self> {
        let row_count = columns.first().map_or(0, |c| c.values.len());
        if columns.iter().any(|c| c.values.len() != row_count) {
            return None;
        }
        Some(Table { columns, row_count })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.row_count
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Column names in positional order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column by position (0-indexed).
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Stack the rows of `other` below the rows of `self`.
    ///
    /// The resulting column set is the union of both, in first-seen order.
    /// Cells a side does not have are filled with [`CellValue::Null`].
    pub fn append(&mut self, other: Table) {
        let before = self.row_count;
        let added = other.row_count;

        for col in other.columns {
            match self.columns.iter_mut().find(|c| c.name == col.name) {
                Some(existing) => existing.values.extend(col.values),
                None => {
                    let mut values = vec![CellValue::Null; before];
                    values.extend(col.values);
                    self.columns.push(Column::new(col.name, values));
                }
            }
        }

        self.row_count = before + added;
        for col in &mut self.columns {
            col.values.resize(self.row_count, CellValue::Null);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_col(name: &str, vals: &[i64]) -> Column {
        Column::new(name, vals.iter().map(|&v| CellValue::Integer(v)).collect())
    }

    #[test]
    fn from_columns_rejects_ragged_input() {
        let cols = vec![int_col("a", &[1, 2]), int_col("b", &[1])];
        assert!(Table::from_columns(cols).is_none());
    }

    #[test]
    fn append_takes_column_union_and_pads_with_null() {
        let mut left = Table::from_columns(vec![int_col("a", &[1]), int_col("b", &[2])]).unwrap();
        let right = Table::from_columns(vec![int_col("b", &[3]), int_col("c", &[4])]).unwrap();

        left.append(right);

        assert_eq!(left.len(), 2);
        assert_eq!(left.column_names(), vec!["a", "b", "c"]);
        assert_eq!(
            left.column("a").unwrap().values,
            vec![CellValue::Integer(1), CellValue::Null]
        );
        assert_eq!(
            left.column("b").unwrap().values,
            vec![CellValue::Integer(2), CellValue::Integer(3)]
        );
        assert_eq!(
            left.column("c").unwrap().values,
            vec![CellValue::Null, CellValue::Integer(4)]
        );
    }

    #[test]
    fn append_into_empty_table() {
        let mut table = Table::default();
        table.append(Table::from_columns(vec![int_col("x", &[7, 8])]).unwrap());
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_at(0).unwrap().name, "x");
    }

    #[test]
    fn floats_display_like_their_csv_text() {
        assert_eq!(CellValue::Float(1.0).to_string(), "1.0");
        assert_eq!(CellValue::Float(-3.0).to_string(), "-3.0");
        assert_eq!(CellValue::Float(0.25).to_string(), "0.25");
        assert_eq!(CellValue::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(CellValue::Integer(1).to_string(), "1");
    }

    #[test]
    fn as_f64_rejects_text_and_null() {
        assert_eq!(CellValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(CellValue::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(CellValue::String("3".into()).as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
    }
}
