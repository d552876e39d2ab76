use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::ClassificationLabel;
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open catalogue…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.catalogue.is_some(), egui::Button::new("Close catalogue"))
                .clicked()
            {
                state.catalogue = None;
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!("Model: {}", state.adapter.describe()))
            .on_hover_text(state.adapter.column_names().join(", "));

        if let Some(cat) = &state.catalogue {
            ui.separator();
            ui.label(format!(
                "{} rows loaded, {} classified",
                cat.rows.len(),
                cat.summary.classified()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – catalogue results
// ---------------------------------------------------------------------------

/// Render the summary, results table and colour–colour diagram.
pub fn catalogue_panel(ui: &mut Ui, state: &AppState) {
    let Some(cat) = &state.catalogue else {
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.strong(
            cat.source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| cat.source.display().to_string()),
        );
        ui.separator();
        for label in ClassificationLabel::ALL {
            let color = state.label_colors.color_for(Some(label));
            ui.label(
                RichText::new(format!("{label}: {}", cat.summary.count(label))).color(color),
            );
        }
        ui.label(
            RichText::new(format!("Rejected: {}", cat.summary.rejected))
                .color(state.label_colors.color_for(None)),
        );
    });
    ui.separator();

    ui.columns(2, |cols: &mut [Ui]| {
        table::catalogue_table(&mut cols[0], cat, &state.label_colors);
        plot::color_color_plot(&mut cols[1], cat, &state.label_colors);
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open photometric catalogue")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_catalogue(&path) {
            Ok(records) => {
                log::info!("Loaded {} records from {}", records.len(), path.display());
                state.set_catalogue(path, records);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
