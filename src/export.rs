use std::path::Path;

use anyhow::{anyhow, Context, Result};
use image::ImageFormat;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::IntoLogRange;
use plotters::prelude::*;

use crate::error::PlotError;
use crate::figure::{category_label, Figure, LineStyle, Marker, Series, YScale};

/// Figure size in inches and output resolution.
const FIG_WIDTH_IN: u32 = 16;
const FIG_HEIGHT_IN: u32 = 9;
pub const DPI: u32 = 150;

const MARKER_SIZE: i32 = 5;
const LINE_WIDTH: u32 = 2;

/// Image format for `path`: PNG when there is no extension, otherwise
/// whatever the extension names, provided it is PNG or JPEG.
pub fn output_format(path: &Path) -> Result<ImageFormat, PlotError> {
    let Some(ext) = path.extension() else {
        return Ok(ImageFormat::Png);
    };
    match ImageFormat::from_extension(ext) {
        Some(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => Ok(format),
        _ => Err(PlotError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Render `figure` to a raster image at `path`.
pub fn save_figure(figure: &Figure, path: &Path) -> Result<()> {
    let format = output_format(path)?;
    let (width, height) = (FIG_WIDTH_IN * DPI, FIG_HEIGHT_IN * DPI);
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_figure(&root, figure)?;
        root.present()?;
    }

    let rendered = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| anyhow!("rendered buffer does not match {width}x{height}"))?;
    rendered
        .save_with_format(path, format)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let b = figure.bounds;
    let mut builder = ChartBuilder::on(root);
    builder
        .margin(30)
        .set_label_area_size(LabelAreaPosition::Left, 90)
        .set_label_area_size(LabelAreaPosition::Bottom, 60);

    let categorical = !figure.x_categories.is_empty();
    let x_fmt = |x: &f64| category_label(&figure.x_categories, *x);
    let y_log_fmt = |y: &f64| format!("{y:e}");

    match figure.y_scale {
        YScale::Linear => {
            let mut chart = builder.build_cartesian_2d(b.x_min..b.x_max, b.y_min..b.y_max)?;
            let mut mesh = chart.configure_mesh();
            mesh.x_desc(figure.x_label)
                .y_desc(figure.y_label)
                .label_style(("sans-serif", 22));
            if categorical {
                mesh.x_labels(figure.x_categories.len() + 2)
                    .x_label_formatter(&x_fmt);
            }
            mesh.draw()?;
            draw_series(&mut chart, &figure.series)?;
            draw_legend(&mut chart)?;
        }
        YScale::Log10 => {
            let mut chart =
                builder.build_cartesian_2d(b.x_min..b.x_max, (b.y_min..b.y_max).log_scale())?;
            let mut mesh = chart.configure_mesh();
            mesh.x_desc(figure.x_label)
                .y_desc(figure.y_label)
                .y_label_formatter(&y_log_fmt)
                .label_style(("sans-serif", 22));
            if categorical {
                mesh.x_labels(figure.x_categories.len() + 2)
                    .x_label_formatter(&x_fmt);
            }
            mesh.draw()?;
            draw_series(&mut chart, &figure.series)?;
            draw_legend(&mut chart)?;
        }
    }
    Ok(())
}

fn draw_legend<'a, DB, Y>(chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, Y>>) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    Y: Ranged<ValueType = f64>,
{
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK.mix(0.3))
        .label_font(("sans-serif", 20))
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;
    Ok(())
}

fn draw_series<'a, DB, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, Y>>,
    series: &[Series],
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    Y: Ranged<ValueType = f64>,
{
    for s in series {
        let color = s.color.to_rgb();
        let style = ShapeStyle {
            color: color.to_rgba(),
            filled: false,
            stroke_width: LINE_WIDTH,
        };

        for segment in &s.segments {
            let points = segment.iter().copied();
            match s.line {
                LineStyle::Solid => {
                    chart.draw_series(LineSeries::new(points, style))?;
                }
                LineStyle::Dashed => {
                    chart.draw_series(DashedLineSeries::new(points, 12, 6, style))?;
                }
                LineStyle::Dotted => {
                    chart.draw_series(DashedLineSeries::new(points, 2, 5, style))?;
                }
            }
        }
        draw_markers(chart, s, style)?;

        // Legend entry comes from an empty series so segments stay unlabelled.
        let marker = s.marker;
        chart
            .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
            .label(s.label.as_str())
            .legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(0, 0), (24, 0)], style)
                    + marker_element(marker, (12, 0), style)
            });
    }
    Ok(())
}

fn draw_markers<'a, DB, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, Y>>,
    series: &Series,
    style: ShapeStyle,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    Y: Ranged<ValueType = f64>,
{
    let marker = series.marker;
    chart.draw_series(
        series
            .points()
            .map(|p| EmptyElement::at(p) + marker_element(marker, (0, 0), style)),
    )?;
    Ok(())
}

fn marker_element(marker: Marker, center: (i32, i32), style: ShapeStyle) -> PathElement<(i32, i32)> {
    PathElement::new(marker_outline(marker, center), style)
}

/// Stroke path of a marker, in pixel offsets around `center`.
fn marker_outline(marker: Marker, center: (i32, i32)) -> Vec<(i32, i32)> {
    let (cx, cy) = center;
    let s = MARKER_SIZE;
    match marker {
        Marker::Circle => (0..=16)
            .map(|i| {
                let a = f64::from(i) * std::f64::consts::TAU / 16.0;
                (
                    cx + (f64::from(s) * a.cos()).round() as i32,
                    cy + (f64::from(s) * a.sin()).round() as i32,
                )
            })
            .collect(),
        Marker::Square => vec![
            (cx - s, cy - s),
            (cx + s, cy - s),
            (cx + s, cy + s),
            (cx - s, cy + s),
            (cx - s, cy - s),
        ],
        Marker::Plus => vec![
            (cx - s, cy),
            (cx + s, cy),
            (cx, cy),
            (cx, cy - s),
            (cx, cy + s),
        ],
        Marker::TriangleUp => vec![(cx, cy - s), (cx + s, cy + s), (cx - s, cy + s), (cx, cy - s)],
        Marker::TriangleDown => vec![(cx, cy + s), (cx + s, cy - s), (cx - s, cy - s), (cx, cy + s)],
        Marker::Cross => vec![
            (cx - s, cy - s),
            (cx + s, cy + s),
            (cx, cy),
            (cx + s, cy - s),
            (cx - s, cy + s),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension_and_defaults_to_png() {
        assert_eq!(output_format(Path::new("plot")).unwrap(), ImageFormat::Png);
        assert_eq!(output_format(Path::new("out/plot.png")).unwrap(), ImageFormat::Png);
        assert_eq!(output_format(Path::new("plot.JPG")).unwrap(), ImageFormat::Jpeg);
        assert!(matches!(
            output_format(Path::new("plot.svg")),
            Err(PlotError::UnsupportedFormat(_))
        ));
        // known to the image crate, but its encoder is not compiled in
        assert!(output_format(Path::new("plot.gif")).is_err());
    }

    #[test]
    fn image_matches_figure_size_at_dpi() {
        assert_eq!(FIG_WIDTH_IN * DPI, 2400);
        assert_eq!(FIG_HEIGHT_IN * DPI, 1350);
    }

    #[test]
    fn markers_stay_within_their_box() {
        for marker in Marker::CYCLE {
            let outline = marker_outline(marker, (100, 50));
            assert!(outline.len() >= 4, "{marker:?}");
            for (x, y) in outline {
                assert!((x - 100).abs() <= MARKER_SIZE, "{marker:?}");
                assert!((y - 50).abs() <= MARKER_SIZE, "{marker:?}");
            }
        }
    }

    #[test]
    fn closed_markers_end_where_they_start() {
        for marker in [Marker::Circle, Marker::Square, Marker::TriangleUp, Marker::TriangleDown] {
            let outline = marker_outline(marker, (0, 0));
            assert_eq!(outline.first(), outline.last(), "{marker:?}");
        }
    }
}
