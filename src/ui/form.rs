use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{Band, ClassificationLabel};
use crate::state::{loading_message, AppState, FormOutcome};

const ACCENT: Color32 = Color32::from_rgb(0x00, 0xff, 0x9d);
const FIELD_LABEL: Color32 = Color32::from_rgb(0xff, 0xcc, 0x00);

// ---------------------------------------------------------------------------
// Field descriptions
// ---------------------------------------------------------------------------

fn magnitude_description(band: Band) -> &'static str {
    match band {
        Band::U => "Ultraviolet filter - Measures high-energy emissions",
        Band::G => "Green filter - Visible spectrum measurements",
        Band::R => "Red filter - Detects cooler stars",
        Band::I => "Near Infrared - Studies dust-obscured objects",
        Band::Z => "Infrared filter - Observes distant objects",
    }
}

fn extinction_description(band: Band) -> &'static str {
    match band {
        Band::U => "UV light absorption by dust",
        Band::G => "Green light absorption by dust",
        Band::R => "Red light absorption by dust",
        Band::I => "Near-infrared light absorption",
        Band::Z => "Infrared light absorption",
    }
}

// ---------------------------------------------------------------------------
// Central panel – single-record form
// ---------------------------------------------------------------------------

/// Render the input form, the classify button and the latest outcome.
pub fn classification_form(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(8.0);
        ui.label(
            RichText::new("🌌 Celestial Object Classifier")
                .size(32.0)
                .strong()
                .color(Color32::WHITE),
        );
    });
    ui.add_space(12.0);

    let pending = state.is_pending();

    ui.add_enabled_ui(!pending, |ui: &mut Ui| {
        ui.columns(3, |cols: &mut [Ui]| {
            card(&mut cols[0], "📊 Spectral Data", |ui: &mut Ui| {
                for band in Band::ALL {
                    number_field(
                        ui,
                        &format!("{} ({band})", band.filter_name()),
                        magnitude_description(band),
                        state.form.magnitude_mut(band),
                    );
                }
            });
            card(&mut cols[1], "🌫️ Extinction Values", |ui: &mut Ui| {
                for band in Band::ALL {
                    number_field(
                        ui,
                        &format!("Extinction {band}"),
                        extinction_description(band),
                        state.form.extinction_mut(band),
                    );
                }
            });
            card(&mut cols[2], "🌟 Additional Information", |ui: &mut Ui| {
                number_field(
                    ui,
                    "Right Ascension (ra)",
                    "Right Ascension - celestial longitude",
                    &mut state.form.ra,
                );
                number_field(
                    ui,
                    "Declination (dec)",
                    "Declination - celestial latitude",
                    &mut state.form.dec,
                );
                number_field(
                    ui,
                    "Redshift",
                    "Indicates object's velocity and distance",
                    &mut state.form.redshift,
                );
            });
        });
    });

    ui.add_space(16.0);
    ui.vertical_centered(|ui: &mut Ui| {
        let classify = egui::Button::new(
            RichText::new("CLASSIFY CELESTIAL OBJECT")
                .size(18.0)
                .strong()
                .color(Color32::BLACK),
        )
        .fill(ACCENT)
        .min_size(egui::vec2(320.0, 44.0));

        if ui.add_enabled(!pending, classify).clicked() {
            let ctx = ui.ctx().clone();
            state.submit(move || ctx.request_repaint());
        }
        if ui.add_enabled(!pending, egui::Button::new("Reset")).clicked() {
            state.clear_form();
        }
    });
    ui.add_space(16.0);

    if let Some(elapsed) = state.pending_elapsed() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label(
                    RichText::new(loading_message(elapsed))
                        .size(20.0)
                        .color(ACCENT),
                );
            });
        });
        return;
    }

    match &state.outcome {
        Some(FormOutcome::Rejected(err)) => {
            egui::Frame::group(ui.style())
                .fill(Color32::from_rgb(0x4a, 0x10, 0x10))
                .show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(err.to_string()).color(Color32::LIGHT_RED));
                });
        }
        Some(FormOutcome::Classified(result)) => {
            egui::Frame::group(ui.style())
                .fill(Color32::from_rgb(0x0d, 0x1b, 0x48))
                .show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical_centered(|ui: &mut Ui| {
                        ui.label(RichText::new("Classification Result").size(22.0).color(ACCENT));
                        ui.label(
                            RichText::new(result.label.as_str())
                                .size(48.0)
                                .strong()
                                .color(Color32::WHITE),
                        );
                    });
                    ui.add_space(8.0);
                    for label in ClassificationLabel::ALL {
                        let p = result.probabilities[label as usize];
                        ui.horizontal(|ui: &mut Ui| {
                            ui.label(format!("{:<7}", label.as_str()));
                            ui.add(
                                egui::ProgressBar::new(p as f32)
                                    .text(format!("{:.1}%", p * 100.0)),
                            );
                        });
                    }
                });
        }
        None => {}
    }
}

// -- Widgets --

fn card(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgba_unmultiplied(13, 27, 72, 180))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.heading(title);
            ui.separator();
            add_contents(ui);
        });
}

/// Numeric input with no range restriction; validation happens on submit.
fn number_field(ui: &mut Ui, label: &str, description: &str, value: &mut f64) {
    ui.label(RichText::new(label).strong().color(FIELD_LABEL));
    ui.label(RichText::new(description).small().weak());
    ui.add(egui::DragValue::new(value).speed(0.01).fixed_decimals(6));
    ui.add_space(6.0);
}
