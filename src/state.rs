use crate::color::ColorMap;
use crate::data::aggregate::{summarize, DashboardSummary};
use crate::data::filter::{selected_indices, FilterCriteria};
use crate::data::model::{Dimension, SalesDataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<SalesDataset>,

    /// Per-dimension filter selections.
    pub criteria: FilterCriteria,

    /// Indices of transactions passing the current filters (cached).
    pub selection: Vec<usize>,

    /// KPIs and chart tables for the current selection; None while the
    /// selection is empty. Rebuilt on every criteria change, never stale.
    pub summary: Option<DashboardSummary>,

    /// Stable bar colour per product line, rebuilt on load.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::empty(),
            selection: Vec::new(),
            summary: None,
            color_map: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset the filters.
    ///
    /// Filters start with nothing selected, so the dashboard opens in the
    /// empty state until the user picks values.
    pub fn set_dataset(&mut self, dataset: SalesDataset) {
        self.criteria = FilterCriteria::empty();
        self.color_map = Some(ColorMap::new(&dataset.product_lines));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `selection` and `summary` after a criteria change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.selection.clear();
            self.summary = None;
            return;
        };
        self.selection = selected_indices(ds, &self.criteria);
        let was_populated = self.summary.is_some();
        self.summary = summarize(ds, &self.selection);
        if was_populated && self.summary.is_none() {
            log::warn!("no data matches the current filter settings");
        }
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &str) {
        self.criteria.toggle(dim, value);
        self.refilter();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(ds) = self.dataset.take() {
            self.criteria.set_all(dim, &ds);
            self.dataset = Some(ds);
            self.refilter();
        }
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.criteria.set_none(dim);
        self.refilter();
    }
}
