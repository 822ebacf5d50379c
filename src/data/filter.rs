use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dimension, SalesDataset};

// ---------------------------------------------------------------------------
// Filter criteria: which distinct values are selected per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection state. All three dimensions are always present.
///
/// An empty selected set means "select nothing" for that dimension, not
/// "no constraint": with nothing checked, no row can match. This mirrors the
/// dashboard's initial state, where every filter starts unchecked and the
/// empty-state message shows until the user picks values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    selected: BTreeMap<Dimension, BTreeSet<String>>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::empty()
    }
}

impl FilterCriteria {
    /// Criteria with nothing selected in any dimension (the initial state).
    pub fn empty() -> Self {
        FilterCriteria {
            selected: Dimension::ALL
                .iter()
                .map(|&dim| (dim, BTreeSet::new()))
                .collect(),
        }
    }

    /// Criteria with every distinct value of every dimension selected.
    /// Applying this is the identity selection.
    pub fn select_all(dataset: &SalesDataset) -> Self {
        FilterCriteria {
            selected: Dimension::ALL
                .iter()
                .map(|&dim| (dim, dataset.values_for(dim).clone()))
                .collect(),
        }
    }

    /// Selected values for one dimension.
    pub fn selected(&self, dim: Dimension) -> &BTreeSet<String> {
        &self.selected[&dim]
    }

    /// Mutable access, for the checkbox widgets.
    pub fn selected_mut(&mut self, dim: Dimension) -> &mut BTreeSet<String> {
        self.selected
            .get_mut(&dim)
            .expect("all dimensions present since construction")
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle(&mut self, dim: Dimension, value: &str) {
        let set = self.selected_mut(dim);
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    /// Select every distinct value of one dimension.
    pub fn set_all(&mut self, dim: Dimension, dataset: &SalesDataset) {
        *self.selected_mut(dim) = dataset.values_for(dim).clone();
    }

    /// Deselect everything in one dimension.
    pub fn set_none(&mut self, dim: Dimension) {
        self.selected_mut(dim).clear();
    }
}

// ---------------------------------------------------------------------------
// Applying criteria
// ---------------------------------------------------------------------------

/// Return indices of transactions matching all three dimension filters.
///
/// A transaction matches when its value is in the selected set of *every*
/// dimension. An empty selected set therefore matches no transaction at all
/// (set membership in the empty set is always false); callers treat the
/// resulting empty selection as the terminal "no data" state.
pub fn selected_indices(dataset: &SalesDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .transactions
        .iter()
        .enumerate()
        .filter(|(_, tx)| {
            Dimension::ALL
                .iter()
                .all(|&dim| criteria.selected(dim).contains(tx.dimension_value(dim)))
        })
        .map(|(i, _)| i)
        .collect()
}
