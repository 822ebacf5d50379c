use std::collections::BTreeMap;

use super::model::SalesDataset;

// ---------------------------------------------------------------------------
// KPI set
// ---------------------------------------------------------------------------

/// The three headline metrics shown as cards above the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSet {
    /// Sum of Total over the selection, truncated to a whole dollar amount.
    pub total_sales: i64,
    /// Mean Rating, rounded to one decimal.
    pub average_rating: f64,
    /// Star-glyph repetition count: `average_rating` rounded to the nearest
    /// integer. Display-only, never stored.
    pub star_rating: u32,
    /// Mean Total per transaction, rounded to two decimals.
    pub avg_transaction: f64,
}

// ---------------------------------------------------------------------------
// DashboardSummary – everything derived from one selection
// ---------------------------------------------------------------------------

/// All derived outputs for the current selection, recomputed as a unit on
/// every criteria change so nothing displayed can go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub kpis: KpiSet,
    /// Summed Total per product line, sorted ascending by the sum.
    pub by_product_line: Vec<(String, f64)>,
    /// Summed Total per hour of day, ordered by hour ascending.
    pub by_hour: Vec<(u32, f64)>,
}

/// Compute the KPI set and both grouped-sum tables for a selection.
///
/// Returns `None` when the selection is empty: no metric is meaningful over
/// zero rows, and the caller renders the "no data" state instead.
pub fn summarize(dataset: &SalesDataset, selection: &[usize]) -> Option<DashboardSummary> {
    if selection.is_empty() {
        return None;
    }

    let n = selection.len() as f64;
    let mut sum_total = 0.0;
    let mut sum_rating = 0.0;
    let mut by_product: BTreeMap<&str, f64> = BTreeMap::new();
    let mut by_hour: BTreeMap<u32, f64> = BTreeMap::new();

    for &i in selection {
        let tx = &dataset.transactions[i];
        sum_total += tx.total;
        sum_rating += tx.rating;
        *by_product.entry(tx.product_line.as_str()).or_insert(0.0) += tx.total;
        *by_hour.entry(tx.hour).or_insert(0.0) += tx.total;
    }

    let average_rating = round_to(sum_rating / n, 1);
    let kpis = KpiSet {
        total_sales: sum_total.floor() as i64,
        average_rating,
        star_rating: average_rating.round() as u32,
        avg_transaction: round_to(sum_total / n, 2),
    };

    let mut by_product_line: Vec<(String, f64)> = by_product
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    // Ascending by summed value; the horizontal chart draws smallest first.
    by_product_line.sort_by(|a, b| a.1.total_cmp(&b.1));

    // BTreeMap iteration already yields hours in ascending order.
    let by_hour: Vec<(u32, f64)> = by_hour.into_iter().collect();

    Some(DashboardSummary {
        kpis,
        by_product_line,
        by_hour,
    })
}

/// Round half away from zero at the given number of decimals.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
