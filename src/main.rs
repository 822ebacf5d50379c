use std::path::Path;

use eframe::egui;
use salesdash::app::SalesDashApp;

/// Workbook picked up automatically when present in the working directory.
const DEFAULT_WORKBOOK: &str = "supermarket_sales.xlsx";

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(|_cc| {
            Ok(Box::new(SalesDashApp::with_initial_file(Path::new(
                DEFAULT_WORKBOOK,
            ))))
        }),
    )
}
