use std::path::Path;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalesDashApp {
    pub state: AppState,
}

impl Default for SalesDashApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl SalesDashApp {
    /// Create the app, loading the workbook at `path` if it exists.
    pub fn with_initial_file(path: &Path) -> Self {
        let mut app = Self::default();
        if path.exists() {
            match crate::data::loader::load_file(path) {
                Ok(dataset) => {
                    log::info!(
                        "loaded {} transactions from {}",
                        dataset.len(),
                        path.display()
                    );
                    app.state.set_dataset(dataset);
                }
                Err(e) => {
                    log::error!("failed to load {}: {e}", path.display());
                    app.state.status_message = Some(format!("Error: {e}"));
                }
            }
        }
        app
    }
}

impl eframe::App for SalesDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPI cards and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::central_panel(ui, &self.state);
        });
    }
}
