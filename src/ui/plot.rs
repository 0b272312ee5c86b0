use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{Corner, GridMark, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points};

use crate::figure::{category_label, LineStyle, Marker, YScale};
use crate::state::ViewerState;

const LINE_WIDTH: f32 = 1.5;
const MARKER_RADIUS: f32 = 4.0;

// ---------------------------------------------------------------------------
// Figure plot (central panel)
// ---------------------------------------------------------------------------

/// Render the figure in the central panel.
///
/// On a log axis the y values are plotted as `log10(y)` and the tick labels
/// are mapped back to data units.
pub fn figure_plot(ui: &mut Ui, state: &ViewerState) {
    let figure = &state.figure;
    let log_y = figure.y_scale == YScale::Log10;
    let to_plot_y = move |y: f64| if log_y { y.log10() } else { y };

    let b = figure.bounds;
    let mut plot = Plot::new("figure_plot")
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_label(figure.x_label)
        .y_axis_label(figure.y_label)
        .include_x(b.x_min)
        .include_x(b.x_max)
        .include_y(to_plot_y(b.y_min))
        .include_y(to_plot_y(b.y_max))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if !figure.x_categories.is_empty() {
        let categories = figure.x_categories.clone();
        plot = plot.x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&categories, mark.value)
        });
    }

    if log_y {
        plot = plot
            .y_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| log_tick(mark.value))
            .label_formatter(|name: &str, value: &PlotPoint| {
                let y = 10f64.powf(value.y);
                if name.is_empty() {
                    format!("x = {:.3}\ny = {y:.4}", value.x)
                } else {
                    format!("{name}\nx = {:.3}\ny = {y:.4}", value.x)
                }
            });
    }

    plot.show(ui, |plot_ui| {
        for series in state.visible_series() {
            let color = series.color.to_color32();

            for segment in &series.segments {
                let points: PlotPoints = segment
                    .iter()
                    .map(|&(x, y)| [x, to_plot_y(y)])
                    .collect();
                let line = Line::new(points)
                    .name(&series.label)
                    .color(color)
                    .style(line_style(series.line))
                    .width(LINE_WIDTH);
                plot_ui.line(line);
            }

            let markers: PlotPoints = series
                .points()
                .map(|(x, y)| [x, to_plot_y(y)])
                .collect();
            plot_ui.points(
                Points::new(markers)
                    .name(&series.label)
                    .color(color)
                    .shape(marker_shape(series.marker))
                    .radius(MARKER_RADIUS)
                    .filled(true),
            );
        }
    });
}

fn line_style(style: LineStyle) -> egui_plot::LineStyle {
    match style {
        LineStyle::Solid => egui_plot::LineStyle::Solid,
        LineStyle::Dashed => egui_plot::LineStyle::dashed_loose(),
        LineStyle::Dotted => egui_plot::LineStyle::dotted_dense(),
    }
}

fn marker_shape(marker: Marker) -> MarkerShape {
    match marker {
        Marker::Circle => MarkerShape::Circle,
        Marker::Square => MarkerShape::Square,
        Marker::Plus => MarkerShape::Plus,
        Marker::TriangleUp => MarkerShape::Up,
        Marker::TriangleDown => MarkerShape::Down,
        Marker::Cross => MarkerShape::Cross,
    }
}

/// Tick label for an exponent on a log10 axis.
fn log_tick(exponent: f64) -> String {
    let rounded = exponent.round();
    if (exponent - rounded).abs() < 1e-9 {
        format!("1e{}", rounded as i64)
    } else {
        format!("{:.3}", 10f64.powf(exponent))
    }
}
