use eframe::egui::Ui;
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::LabelColors;
use crate::data::model::ClassificationLabel;
use crate::state::Catalogue;

// ---------------------------------------------------------------------------
// Colour–colour diagram
// ---------------------------------------------------------------------------

/// Scatter `u-g` against `g-r` for every classified row, one series per
/// predicted label.
pub fn color_color_plot(ui: &mut Ui, catalogue: &Catalogue, colors: &LabelColors) {
    Plot::new("color_color_plot")
        .legend(Legend::default())
        .x_axis_label("g - r")
        .y_axis_label("u - g")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for label in ClassificationLabel::ALL {
                let points: PlotPoints = catalogue
                    .rows
                    .iter()
                    .filter(|row| row.label() == Some(label))
                    .filter_map(|row| row.features)
                    .map(|f| [f.colors.g_r, f.colors.u_g])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(label.as_str())
                        .color(colors.color_for(Some(label)))
                        .radius(2.5),
                );
            }
        });
}
