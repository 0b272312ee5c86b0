use crate::color::{generate_palette, SeriesColor};
use crate::data::filter::{distinct_values, rows_matching, select_measurements};
use crate::data::model::{CellValue, Column, Table};
use crate::error::PlotError;

pub const BUILD_COLUMN: &str = "build";
pub const SCALE_COLUMN: &str = "scale";
pub const X_LABEL: &str = "scale";
pub const Y_LABEL: &str = "time(seconds)";

// ---------------------------------------------------------------------------
// Styling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YScale {
    Linear,
    Log10,
}

/// Line dash pattern, one per build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    pub const CYCLE: [LineStyle; 3] = [LineStyle::Solid, LineStyle::Dashed, LineStyle::Dotted];
}

/// Point marker drawn at every data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Plus,
    TriangleUp,
    TriangleDown,
    Cross,
}

impl Marker {
    pub const CYCLE: [Marker; 6] = [
        Marker::Circle,
        Marker::Square,
        Marker::Plus,
        Marker::TriangleUp,
        Marker::TriangleDown,
        Marker::Cross,
    ];
}

// ---------------------------------------------------------------------------
// Figure model
// ---------------------------------------------------------------------------

/// One plotted line: a (build, measurement column) pair.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub color: SeriesColor,
    pub line: LineStyle,
    pub marker: Marker,
    /// Contiguous runs of plottable points. A missing value ends a run.
    pub segments: Vec<Vec<(f64, f64)>>,
}

impl Series {
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.segments.iter().flatten().copied()
    }
}

/// Axis ranges in data units, already padded for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Everything a renderer needs, independent of the drawing backend.
#[derive(Debug, Clone)]
pub struct Figure {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub y_scale: YScale,
    /// Tick labels for a non-numeric scale column. Category `i` sits at x = `i`.
    /// Empty when the scale column is numeric.
    pub x_categories: Vec<String>,
    pub series: Vec<Series>,
    pub bounds: Bounds,
}

/// Label for the category at position `x`, or an empty string between or
/// outside the categories.
pub fn category_label(categories: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    categories.get(index as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Build one series per (build, measurement) pair from the combined table.
///
/// Builds are taken in first-seen order; rows keep their table order within
/// each build.
pub fn build_figure(table: &Table, measurements: &[String], y_scale: YScale) -> Result<Figure, PlotError> {
    let build_col = table
        .column(BUILD_COLUMN)
        .ok_or(PlotError::MissingColumn(BUILD_COLUMN))?;
    let scale_col = table
        .column(SCALE_COLUMN)
        .ok_or(PlotError::MissingColumn(SCALE_COLUMN))?;

    let builds = distinct_values(build_col);
    let categories = scale_categories(scale_col);
    if !categories.is_empty() {
        log::warn!(
            "{SCALE_COLUMN} column is not numeric, plotting its {} value(s) as categories",
            categories.len()
        );
    }
    let x_position = |v: &CellValue| {
        if categories.is_empty() {
            v.as_f64()
        } else {
            categories.iter().position(|c| c == v).map(|i| i as f64)
        }
    };

    let ycols = select_measurements(table, measurements)?;
    let palette = generate_palette(ycols.len());

    let mut series = Vec::with_capacity(builds.len() * ycols.len());
    for (bindex, build) in builds.iter().enumerate() {
        let rows = rows_matching(build_col, build);
        let line = LineStyle::CYCLE[bindex % LineStyle::CYCLE.len()];

        for (yindex, ycol) in ycols.iter().enumerate() {
            // Selected columns always exist.
            let Some(values) = table.column(ycol) else {
                continue;
            };
            let sindex = bindex * ycols.len() + yindex;
            let label = format!("{build} {ycol}");
            let segments = segments(&rows, scale_col, values, y_scale, &x_position);
            if segments.is_empty() {
                log::warn!("{label}: no plottable points");
            }
            series.push(Series {
                label,
                color: palette[yindex],
                line,
                marker: Marker::CYCLE[sindex % Marker::CYCLE.len()],
                segments,
            });
        }
    }

    log::info!(
        "{} build(s) x {} column(s) -> {} series",
        builds.len(),
        ycols.len(),
        series.len()
    );

    let bounds = bounds(&series, y_scale);
    Ok(Figure {
        x_label: X_LABEL,
        y_label: Y_LABEL,
        y_scale,
        x_categories: categories.iter().map(CellValue::to_string).collect(),
        series,
        bounds,
    })
}

/// Distinct scale values in first-seen order when any of them is not a
/// number, otherwise nothing.
fn scale_categories(scale: &Column) -> Vec<CellValue> {
    let numeric = scale
        .values
        .iter()
        .all(|v| matches!(v, CellValue::Integer(_) | CellValue::Float(_) | CellValue::Null));
    if numeric {
        Vec::new()
    } else {
        distinct_values(scale)
    }
}

fn segments(
    rows: &[usize],
    x: &Column,
    y: &Column,
    y_scale: YScale,
    x_position: impl Fn(&CellValue) -> Option<f64>,
) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for &row in rows {
        let xv = x_position(&x.values[row]);
        let yv = y.values[row]
            .as_f64()
            .filter(|v| y_scale == YScale::Linear || *v > 0.0);
        match (xv, yv) {
            (Some(xv), Some(yv)) => current.push((xv, yv)),
            _ if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            _ => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

const PADDING: f64 = 0.05;

fn bounds(series: &[Series], y_scale: YScale) -> Bounds {
    let points = || series.iter().flat_map(Series::points);
    let (x_min, x_max) = min_max(points().map(|p| p.0)).unwrap_or((0.0, 1.0));
    let (x_min, x_max) = pad_linear(x_min, x_max);

    let (y_min, y_max) = match y_scale {
        YScale::Linear => {
            let (lo, hi) = min_max(points().map(|p| p.1)).unwrap_or((0.0, 1.0));
            pad_linear(lo, hi)
        }
        YScale::Log10 => {
            let (lo, hi) = min_max(points().map(|p| p.1.log10())).unwrap_or((0.0, 1.0));
            let (lo, hi) = pad_linear(lo, hi);
            (10f64.powf(lo), 10f64.powf(hi))
        }
    };

    Bounds {
        x_min,
        x_max,
        y_min,
        y_max,
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn pad_linear(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * PADDING
    } else if lo != 0.0 {
        lo.abs() * PADDING
    } else {
        0.5
    };
    (lo - pad, hi + pad)
}
