use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::NaiveTime;
use serde::Deserialize;
use thiserror::Error;

use super::model::{SalesDataset, Transaction};

// ---------------------------------------------------------------------------
// Source layout constants
// ---------------------------------------------------------------------------

/// Worksheet holding the transaction data.
const SHEET_NAME: &str = "Sales";
/// Absolute row index of the header row (three banner rows above it).
const HEADER_ROW: u32 = 3;
/// Absolute column window B:R (0-based, end exclusive).
const FIRST_COL: u32 = 1;
const LAST_COL: u32 = 18;
/// Cap on data rows read from any source.
const MAX_ROWS: usize = 1000;

const REQUIRED_COLUMNS: [&str; 7] = [
    "City",
    "Customer_type",
    "Gender",
    "Product line",
    "Total",
    "Rating",
    "Time",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A load failure. Always fatal for the attempted load: the dataset is
/// produced whole or not at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("excel: {0}")]
    Excel(#[from] calamine::Error),
    #[error("workbook has no sheet named '{0}'")]
    MissingSheet(&'static str),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row {row}: invalid {column} value '{value}'")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
    },
}

type Result<T> = std::result::Result<T, LoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sales dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` – workbook with a "Sales" sheet,
///   header row below three banner rows, data in columns B:R (recommended)
/// * `.csv` – header row with the same column names
pub fn load_file(path: &Path) -> Result<SalesDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" => load_excel(path),
        "csv" => load_csv(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

fn load_excel(path: &Path) -> Result<SalesDataset> {
    let mut workbook = open_workbook_auto(path)?;
    if !workbook.sheet_names().iter().any(|s| s == SHEET_NAME) {
        return Err(LoadError::MissingSheet(SHEET_NAME));
    }
    let range = workbook.worksheet_range(SHEET_NAME)?;
    dataset_from_sheet(&range)
}

/// Parse the worksheet cells: header row at `HEADER_ROW` inside the B:R
/// window, then data rows until the cap or the first blank row.
fn dataset_from_sheet(range: &Range<Data>) -> Result<SalesDataset> {
    // Header cells inside the B:R window, keyed by absolute column index.
    let headers: Vec<(u32, String)> = (FIRST_COL..LAST_COL)
        .filter_map(|col| {
            range
                .get_value((HEADER_ROW, col))
                .and_then(|c| c.as_string())
                .map(|name| (col, name))
        })
        .collect();

    let column_at = |name: &'static str| -> Result<u32> {
        headers
            .iter()
            .find(|(_, h)| h == name)
            .map(|&(col, _)| col)
            .ok_or(LoadError::MissingColumn(name))
    };

    let city_col = column_at("City")?;
    let customer_type_col = column_at("Customer_type")?;
    let gender_col = column_at("Gender")?;
    let product_line_col = column_at("Product line")?;
    let total_col = column_at("Total")?;
    let rating_col = column_at("Rating")?;
    let time_col = column_at("Time")?;

    let end_row = range.end().map(|(r, _)| r).unwrap_or(0);
    let mut transactions = Vec::new();

    for row in (HEADER_ROW + 1)..=end_row {
        if transactions.len() >= MAX_ROWS {
            break;
        }
        let cell = |col: u32| range.get_value((row, col));

        // Trailing blank region below the data ends the sheet.
        let blank = [city_col, total_col, time_col]
            .iter()
            .all(|&c| matches!(cell(c), None | Some(Data::Empty)));
        if blank {
            break;
        }

        let row_no = row as usize;
        transactions.push(Transaction::new(
            string_cell(cell(city_col), row_no, "City")?,
            string_cell(cell(customer_type_col), row_no, "Customer_type")?,
            string_cell(cell(gender_col), row_no, "Gender")?,
            string_cell(cell(product_line_col), row_no, "Product line")?,
            float_cell(cell(total_col), row_no, "Total")?,
            float_cell(cell(rating_col), row_no, "Rating")?,
            time_cell(cell(time_col), row_no)?,
        ));
    }

    Ok(SalesDataset::from_transactions(transactions))
}

// -- Excel cell helpers --

fn invalid(row: usize, column: &'static str, cell: Option<&Data>) -> LoadError {
    LoadError::InvalidCell {
        row,
        column,
        value: cell.map(|c| c.to_string()).unwrap_or_default(),
    }
}

fn string_cell(cell: Option<&Data>, row: usize, column: &'static str) -> Result<String> {
    cell.and_then(|c| c.as_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| invalid(row, column, cell))
}

fn float_cell(cell: Option<&Data>, row: usize, column: &'static str) -> Result<f64> {
    cell.and_then(|c| c.as_f64())
        .ok_or_else(|| invalid(row, column, cell))
}

/// Time cells appear either as true Excel time values or as `HH:MM:SS` text.
fn time_cell(cell: Option<&Data>, row: usize) -> Result<NaiveTime> {
    if let Some(t) = cell.and_then(|c| c.as_time()) {
        return Ok(t);
    }
    cell.and_then(|c| c.as_string())
        .and_then(|s| NaiveTime::parse_from_str(&s, "%H:%M:%S").ok())
        .ok_or_else(|| invalid(row, "Time", cell))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV record with the spreadsheet's column names.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Customer_type")]
    customer_type: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Product line")]
    product_line: String,
    #[serde(rename = "Total")]
    total: f64,
    #[serde(rename = "Rating")]
    rating: f64,
    #[serde(rename = "Time")]
    time: String,
}

fn load_csv(path: &Path) -> Result<SalesDataset> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }

    let mut transactions = Vec::new();
    for (row_no, result) in reader.deserialize::<CsvRecord>().enumerate() {
        if transactions.len() >= MAX_ROWS {
            break;
        }
        let record = result?;
        let time = NaiveTime::parse_from_str(&record.time, "%H:%M:%S").map_err(|_| {
            LoadError::InvalidCell {
                row: row_no + 1,
                column: "Time",
                value: record.time.clone(),
            }
        })?;
        transactions.push(Transaction::new(
            record.city,
            record.customer_type,
            record.gender,
            record.product_line,
            record.total,
            record.rating,
            time,
        ));
    }

    Ok(SalesDataset::from_transactions(transactions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use std::io::Write;

    // -- Excel sheet parsing --

    /// Empty grid wide enough for the B:R window plus one column either side.
    fn blank_sheet(rows: u32) -> Range<Data> {
        Range::new((0, 0), (rows - 1, 19))
    }

    fn set_headers(range: &mut Range<Data>, names: &[&str]) {
        for (i, name) in names.iter().enumerate() {
            range.set_value((HEADER_ROW, FIRST_COL + i as u32), Data::String(name.to_string()));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn set_row(
        range: &mut Range<Data>,
        row: u32,
        city: &str,
        ctype: &str,
        gender: &str,
        line: &str,
        total: f64,
        rating: f64,
        time: Data,
    ) {
        range.set_value((row, FIRST_COL), Data::String(city.to_string()));
        range.set_value((row, FIRST_COL + 1), Data::String(ctype.to_string()));
        range.set_value((row, FIRST_COL + 2), Data::String(gender.to_string()));
        range.set_value((row, FIRST_COL + 3), Data::String(line.to_string()));
        range.set_value((row, FIRST_COL + 4), Data::Float(total));
        range.set_value((row, FIRST_COL + 5), Data::Float(rating));
        range.set_value((row, FIRST_COL + 6), time);
    }

    const SHEET_HEADERS: [&str; 7] = [
        "City",
        "Customer_type",
        "Gender",
        "Product line",
        "Total",
        "Rating",
        "Time",
    ];

    #[test]
    fn sheet_parses_below_banner_rows() {
        let mut range = blank_sheet(8);
        // Banner rows above the header are ignored.
        range.set_value((0, 1), Data::String("Supermarket Sales Report".into()));
        range.set_value((1, 1), Data::String("Q1".into()));
        set_headers(&mut range, &SHEET_HEADERS);
        set_row(
            &mut range, 4, "Yangon", "Member", "Female", "Food", 100.5, 8.0,
            Data::String("10:25:00".into()),
        );
        set_row(
            &mut range, 5, "Mandalay", "Normal", "Male", "Apparel", 55.25, 6.5,
            Data::String("19:05:30".into()),
        );

        let ds = dataset_from_sheet(&range).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.transactions[0].city, "Yangon");
        assert_eq!(ds.transactions[0].hour, 10);
        assert_eq!(ds.transactions[1].hour, 19);
        assert_eq!(ds.transactions[1].total, 55.25);
    }

    #[test]
    fn extra_columns_in_window_are_ignored() {
        let mut range = blank_sheet(6);
        set_headers(
            &mut range,
            &[
                "Invoice ID",
                "City",
                "Customer_type",
                "Gender",
                "Product line",
                "Unit price",
                "Total",
                "Rating",
                "Time",
            ],
        );
        range.set_value((4, FIRST_COL), Data::String("750-67-8428".into()));
        range.set_value((4, FIRST_COL + 1), Data::String("Yangon".into()));
        range.set_value((4, FIRST_COL + 2), Data::String("Member".into()));
        range.set_value((4, FIRST_COL + 3), Data::String("Female".into()));
        range.set_value((4, FIRST_COL + 4), Data::String("Food".into()));
        range.set_value((4, FIRST_COL + 5), Data::Float(74.69));
        range.set_value((4, FIRST_COL + 6), Data::Float(100.5));
        range.set_value((4, FIRST_COL + 7), Data::Float(8.0));
        range.set_value((4, FIRST_COL + 8), Data::String("13:08:00".into()));

        let ds = dataset_from_sheet(&range).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.transactions[0].product_line, "Food");
        assert_eq!(ds.transactions[0].hour, 13);
    }

    #[test]
    fn native_excel_time_cells_convert() {
        let mut range = blank_sheet(6);
        set_headers(&mut range, &SHEET_HEADERS);
        // 10:25:00 as a fraction of the day.
        let fraction = (10.0 * 3600.0 + 25.0 * 60.0) / 86_400.0;
        set_row(
            &mut range, 4, "Yangon", "Member", "Female", "Food", 100.5, 8.0,
            Data::DateTime(ExcelDateTime::new(fraction, ExcelDateTimeType::DateTime, false)),
        );

        let ds = dataset_from_sheet(&range).unwrap();
        assert_eq!(ds.transactions[0].hour, 10);
    }

    #[test]
    fn blank_row_ends_the_data() {
        let mut range = blank_sheet(8);
        set_headers(&mut range, &SHEET_HEADERS);
        set_row(
            &mut range, 4, "Yangon", "Member", "Female", "Food", 100.5, 8.0,
            Data::String("10:25:00".into()),
        );
        // Row 5 left blank; row 6 is below the data region and must not load.
        set_row(
            &mut range, 6, "Mandalay", "Normal", "Male", "Apparel", 55.25, 6.5,
            Data::String("19:05:30".into()),
        );

        let ds = dataset_from_sheet(&range).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.transactions[0].city, "Yangon");
    }

    #[test]
    fn sheet_missing_column_is_fatal() {
        let mut range = blank_sheet(6);
        set_headers(
            &mut range,
            &["City", "Customer_type", "Product line", "Total", "Rating", "Time"],
        );
        match dataset_from_sheet(&range) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "Gender"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn headers_outside_window_are_not_discovered() {
        let mut range = blank_sheet(6);
        set_headers(&mut range, &SHEET_HEADERS[1..]);
        // "City" present only in column A and column S, both outside B:R.
        range.set_value((HEADER_ROW, 0), Data::String("City".into()));
        range.set_value((HEADER_ROW, LAST_COL), Data::String("City".into()));
        match dataset_from_sheet(&range) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "City"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn sheet_bad_time_cell_is_fatal() {
        let mut range = blank_sheet(6);
        set_headers(&mut range, &SHEET_HEADERS);
        set_row(
            &mut range, 4, "Yangon", "Member", "Female", "Food", 100.5, 8.0,
            Data::String("not-a-time".into()),
        );
        match dataset_from_sheet(&range) {
            Err(LoadError::InvalidCell { column: "Time", row, .. }) => assert_eq!(row, 4),
            other => panic!("expected InvalidCell, got {other:?}"),
        }
    }

    // -- CSV loading --

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const HEADER: &str = "City,Customer_type,Gender,Product line,Total,Rating,Time\n";

    #[test]
    fn csv_rows_load_with_derived_hour() {
        let file = write_csv(&format!(
            "{HEADER}Yangon,Member,Female,Food,100.50,8.0,10:25:00\n\
             Mandalay,Normal,Male,Apparel,55.25,6.5,19:05:30\n"
        ));
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.transactions[0].hour, 10);
        assert_eq!(ds.transactions[1].hour, 19);
        assert_eq!(ds.transactions[0].total, 100.50);
    }

    #[test]
    fn csv_missing_column_is_fatal() {
        let file = write_csv("City,Customer_type,Gender,Total,Rating,Time\n");
        match load_file(file.path()) {
            Err(LoadError::MissingColumn(col)) => assert_eq!(col, "Product line"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn csv_bad_time_is_fatal() {
        let file = write_csv(&format!(
            "{HEADER}Yangon,Member,Female,Food,100.0,8.0,not-a-time\n"
        ));
        match load_file(file.path()) {
            Err(LoadError::InvalidCell { column: "Time", row, .. }) => assert_eq!(row, 1),
            other => panic!("expected InvalidCell, got {other:?}"),
        }
    }

    #[test]
    fn csv_row_cap_applies() {
        let mut contents = String::from(HEADER);
        for i in 0..(MAX_ROWS + 25) {
            contents.push_str(&format!(
                "Yangon,Member,Female,Food,10.0,7.0,{:02}:00:00\n",
                i % 24
            ));
        }
        let file = write_csv(&contents);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), MAX_ROWS);
    }

    #[test]
    fn unknown_extension_rejected() {
        let err = load_file(Path::new("sales.parquet")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(e) if e == "parquet"));
    }
}
