use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::LabelColors;
use crate::state::Catalogue;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Catalogue results table
// ---------------------------------------------------------------------------

/// One line per catalogue row: coordinates, key features and the outcome.
pub fn catalogue_table(ui: &mut Ui, catalogue: &Catalogue, colors: &LabelColors) {
    TableBuilder::new(ui)
        .id_salt("catalogue_table")
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(40.0))
        .columns(Column::auto().at_least(70.0), 5)
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in ["#", "ra", "dec", "redshift", "u-g", "g-r", "result"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, catalogue.rows.len(), |mut row| {
                let idx = row.index();
                let entry = &catalogue.rows[idx];
                let rec = &entry.record;

                row.col(|ui: &mut Ui| {
                    ui.label(idx.to_string());
                });
                for value in [rec.ra, rec.dec, rec.redshift] {
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{value:.4}"));
                    });
                }
                match entry.features {
                    Some(f) => {
                        for value in [f.colors.u_g, f.colors.g_r] {
                            row.col(|ui: &mut Ui| {
                                ui.label(format!("{value:.3}"));
                            });
                        }
                    }
                    None => {
                        for _ in 0..2 {
                            row.col(|ui: &mut Ui| {
                                ui.weak("–");
                            });
                        }
                    }
                }
                row.col(|ui: &mut Ui| match &entry.outcome {
                    Ok(c) => {
                        ui.label(
                            RichText::new(format!(
                                "{} ({:.0}%)",
                                c.label,
                                c.confidence() * 100.0
                            ))
                            .color(colors.color_for(Some(c.label))),
                        );
                    }
                    Err(e) => {
                        ui.label(RichText::new("rejected").color(colors.color_for(None)))
                            .on_hover_text(e.to_string());
                    }
                });
            });
        });
}
