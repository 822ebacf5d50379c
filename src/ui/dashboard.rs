use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::data::aggregate::DashboardSummary;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – KPI cards and charts
// ---------------------------------------------------------------------------

/// Render the dashboard in the central panel.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a sales workbook to begin  (File → Open…)");
        });
        return;
    }

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("📊 Sales Dashboard");
    });
    ui.separator();

    // Terminal empty-state: nothing selected or no row meets the criteria.
    // No KPI or chart is computed from an empty selection.
    let Some(summary) = &state.summary else {
        ui.add_space(24.0);
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(
                RichText::new("⚠ No data available based on the current filter settings!")
                    .color(Color32::GOLD)
                    .heading(),
            );
        });
        return;
    };

    kpi_row(ui, summary);
    ui.separator();

    let chart_height = (ui.available_height() - 8.0).max(120.0);
    ui.columns(2, |cols: &mut [Ui]| {
        hourly_chart(&mut cols[0], summary, chart_height);
        product_line_chart(&mut cols[1], state, summary, chart_height);
    });
}

// ---------------------------------------------------------------------------
// KPI cards
// ---------------------------------------------------------------------------

fn kpi_row(ui: &mut Ui, summary: &DashboardSummary) {
    let k = &summary.kpis;
    ui.columns(3, |cols: &mut [Ui]| {
        kpi_card(
            &mut cols[0],
            "Total Sales",
            format!("US $ {}", format_thousands(k.total_sales)),
        );
        kpi_card(
            &mut cols[1],
            "Average Rating",
            format!("{:.1} {}", k.average_rating, "★".repeat(k.star_rating as usize)),
        );
        kpi_card(
            &mut cols[2],
            "Avg. Sale / Transaction",
            format!("US $ {:.2}", k.avg_transaction),
        );
    });
}

fn kpi_card(ui: &mut Ui, title: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(title).strong());
            ui.label(RichText::new(value).heading());
        });
    });
}

/// Format an integer with `,` thousands separators.
fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Vertical bars: summed Total per hour of day, linear integer ticks.
fn hourly_chart(ui: &mut Ui, summary: &DashboardSummary, height: f32) {
    ui.label(RichText::new("Sales by Hour").strong());

    let bars: Vec<Bar> = summary
        .by_hour
        .iter()
        .map(|&(hour, total)| {
            Bar::new(hour as f64, total)
                .name(format!("{hour:02}:00"))
                .fill(Color32::from_rgb(255, 75, 75))
        })
        .collect();

    Plot::new("sales_by_hour")
        .height(height)
        .x_axis_label("Hour")
        .y_axis_label("Total")
        .include_x(0.0)
        .include_x(23.0)
        .allow_scroll(false)
        .x_axis_formatter(|mark, _range| {
            // Whole hours only; fractional grid marks stay unlabeled.
            if mark.value.fract() == 0.0 && (0.0..=23.0).contains(&mark.value) {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.6));
        });
}

/// Horizontal bars: summed Total per product line, ascending by sum.
fn product_line_chart(ui: &mut Ui, state: &AppState, summary: &DashboardSummary, height: f32) {
    ui.label(RichText::new("Sales by Product Line").strong());

    let labels: Vec<String> = summary
        .by_product_line
        .iter()
        .map(|(name, _)| name.clone())
        .collect();

    let bars: Vec<Bar> = summary
        .by_product_line
        .iter()
        .enumerate()
        .map(|(i, (name, total))| {
            let color = state
                .color_map
                .as_ref()
                .map(|cm| cm.color_for(name))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, *total).name(name.clone()).fill(color)
        })
        .collect();

    Plot::new("sales_by_product_line")
        .height(height)
        .x_axis_label("Total")
        .allow_scroll(false)
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() < f64::EPSILON && idx >= 0.0 {
                labels.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().width(0.6));
        });
}
