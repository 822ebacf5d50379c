use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{NaiveTime, Timelike};

// ---------------------------------------------------------------------------
// Dimension – the three filterable categorical columns
// ---------------------------------------------------------------------------

/// A filterable dimension of the dataset. The set is fixed by the source
/// schema; each variant maps to exactly one `Transaction` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    City,
    CustomerType,
    Gender,
}

impl Dimension {
    /// All dimensions, in the order they appear in the filter panel.
    pub const ALL: [Dimension; 3] = [
        Dimension::City,
        Dimension::CustomerType,
        Dimension::Gender,
    ];

    /// Column header as it appears in the source spreadsheet.
    pub fn column_name(&self) -> &'static str {
        match self {
            Dimension::City => "City",
            Dimension::CustomerType => "Customer_type",
            Dimension::Gender => "Gender",
        }
    }

    /// Human-readable label for the filter panel.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::City => "City",
            Dimension::CustomerType => "Customer Type",
            Dimension::Gender => "Gender",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Transaction – one row of the source spreadsheet
// ---------------------------------------------------------------------------

/// A single retail transaction (one data row of the source sheet).
/// Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub city: String,
    pub customer_type: String,
    pub gender: String,
    pub product_line: String,
    /// Gross amount of the sale.
    pub total: f64,
    /// Customer rating on a 0–10 scale.
    pub rating: f64,
    /// Time of day the sale occurred.
    pub time: NaiveTime,
    /// Hour component of `time` (0–23), derived once at load.
    pub hour: u32,
}

impl Transaction {
    /// Build a transaction, deriving `hour` from the time of day.
    pub fn new(
        city: String,
        customer_type: String,
        gender: String,
        product_line: String,
        total: f64,
        rating: f64,
        time: NaiveTime,
    ) -> Self {
        let hour = time.hour();
        Transaction {
            city,
            customer_type,
            gender,
            product_line,
            total,
            rating,
            time,
            hour,
        }
    }

    /// Value of the given filter dimension for this transaction.
    pub fn dimension_value(&self, dim: Dimension) -> &str {
        match dim {
            Dimension::City => &self.city,
            Dimension::CustomerType => &self.customer_type,
            Dimension::Gender => &self.gender,
        }
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full loaded dataset with pre-computed distinct values per dimension.
///
/// Constructed once per load and passed by reference into every filter and
/// aggregate call; there is no implicit global copy.
#[derive(Debug, Clone)]
pub struct SalesDataset {
    /// All transactions (rows), in source order.
    pub transactions: Vec<Transaction>,
    /// For each filter dimension, the sorted set of distinct values.
    pub distinct_values: BTreeMap<Dimension, BTreeSet<String>>,
    /// Distinct product lines, for stable chart colouring.
    pub product_lines: BTreeSet<String>,
}

impl SalesDataset {
    /// Build the per-dimension distinct-value index from the loaded rows.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let mut distinct_values: BTreeMap<Dimension, BTreeSet<String>> = Dimension::ALL
            .iter()
            .map(|&dim| (dim, BTreeSet::new()))
            .collect();

        let mut product_lines = BTreeSet::new();
        for tx in &transactions {
            for &dim in &Dimension::ALL {
                distinct_values
                    .get_mut(&dim)
                    .expect("all dimensions pre-inserted")
                    .insert(tx.dimension_value(dim).to_string());
            }
            product_lines.insert(tx.product_line.clone());
        }

        SalesDataset {
            transactions,
            distinct_values,
            product_lines,
        }
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Distinct values for one dimension.
    pub fn values_for(&self, dim: Dimension) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.distinct_values.get(&dim).unwrap_or(&EMPTY)
    }
}
