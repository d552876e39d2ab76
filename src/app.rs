use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use crate::classifier::ClassifierAdapter;
use crate::state::AppState;
use crate::ui::{form, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CelestialApp {
    pub state: AppState,
}

impl CelestialApp {
    pub fn new(adapter: Arc<ClassifierAdapter>) -> Self {
        Self {
            state: AppState::new(adapter),
        }
    }
}

impl eframe::App for CelestialApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();
        if self.state.is_pending() {
            // Keeps the loading message rotating.
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: catalogue results ----
        if self.state.catalogue.is_some() {
            egui::TopBottomPanel::bottom("catalogue_panel")
                .default_height(320.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::catalogue_panel(ui, &self.state);
                });
        }

        // ---- Central panel: single-record form ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    form::classification_form(ui, &mut self.state);
                });
        });
    }
}
