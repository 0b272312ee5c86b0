use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::figure::YScale;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – series toggles
// ---------------------------------------------------------------------------

/// Render the left panel listing every series with a visibility checkbox.
pub fn side_panel(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading("Series");
    ui.separator();

    if state.figure.series.is_empty() {
        ui.label("Nothing to plot.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.set_all(true);
        }
        if ui.small_button("None").clicked() {
            state.set_all(false);
        }
    });

    let mut toggled = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, series) in state.figure.series.iter().enumerate() {
                let text = RichText::new(&series.label).color(series.color.to_color32());
                let mut checked = state.visible[idx];
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(idx);
                }
            }
        });

    if let Some(idx) = toggled {
        state.toggle(idx);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the summary bar above the plot.
pub fn top_bar(ui: &mut Ui, state: &ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!(
            "{} rows from {} file(s)",
            state.row_count, state.file_count
        ));

        ui.separator();

        ui.label(format!(
            "{} of {} series visible",
            state.visible_count(),
            state.figure.series.len()
        ));

        ui.separator();

        let scale = match state.figure.y_scale {
            YScale::Linear => "linear y",
            YScale::Log10 => "log10 y",
        };
        ui.label(RichText::new(scale).weak());
    });
}
