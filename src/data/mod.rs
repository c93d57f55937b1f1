//! Dataset loading and the in-memory transactions table.
//!
//! The source file is a fixed-schema CSV encoded in ISO-8859-1. It is
//! decoded and parsed once at startup into an immutable `Dataset`;
//! every page render afterwards is a pure read of that table. Any
//! failure here is fatal to the process; there is no partial load
//! and no recovery path.

use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::Transaction;

/// Columns the loader requires in the source file, by header name.
/// Extra columns in the file are ignored.
pub const SOURCE_COLUMNS: [&str; 10] = [
    "Category",
    "Sub-Category",
    "Region",
    "Segment",
    "Ship Mode",
    "Order Date",
    "Sales",
    "Profit",
    "Discount",
    "Shipping Cost",
];

/// Columns computed from `Order Date` at load time.
pub const DERIVED_COLUMNS: [&str; 2] = ["Order Month", "Order Day"];

/// Date formats the published dataset has shipped with, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%d/%m/%Y"];

/// Errors raised while loading the dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read dataset file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset CSV")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: {message}")]
    Row { row: usize, message: String },

    #[error("dataset {path} contains no transactions")]
    Empty { path: PathBuf },
}

/// Options for loading the dataset.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Whether to show a progress spinner while parsing rows.
    pub show_progress: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { show_progress: true }
    }
}

/// The loaded transactions table. Immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<Transaction>,
    path: PathBuf,
}

impl Dataset {
    /// Build a dataset directly from rows (used by tests and callers
    /// that synthesize tables).
    pub fn from_rows(rows: Vec<Transaction>, path: PathBuf) -> Self {
        Self { rows, path }
    }

    /// All transactions, in file order.
    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no transactions.
    #[allow(dead_code)] // Companion accessor to len
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Path of the source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full column set: source columns plus derived columns.
    pub fn columns() -> Vec<&'static str> {
        SOURCE_COLUMNS
            .iter()
            .chain(DERIVED_COLUMNS.iter())
            .copied()
            .collect()
    }

    /// Earliest and latest order dates in the table.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|t| t.order_date).min()?;
        let max = self.rows.iter().map(|t| t.order_date).max()?;
        Some((min, max))
    }
}

/// Positions of the required columns within the header record.
struct ColumnIndex {
    category: usize,
    sub_category: usize,
    region: usize,
    segment: usize,
    ship_mode: usize,
    order_date: usize,
    sales: usize,
    profit: usize,
    discount: usize,
    shipping_cost: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DataError> {
        let find = |name: &'static str| -> Result<usize, DataError> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(DataError::MissingColumn(name))
        };

        Ok(Self {
            category: find("Category")?,
            sub_category: find("Sub-Category")?,
            region: find("Region")?,
            segment: find("Segment")?,
            ship_mode: find("Ship Mode")?,
            order_date: find("Order Date")?,
            sales: find("Sales")?,
            profit: find("Profit")?,
            discount: find("Discount")?,
            shipping_cost: find("Shipping Cost")?,
        })
    }
}

/// Load the transactions table from an ISO-8859-1 encoded CSV file.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset, DataError> {
    info!("Loading dataset: {}", path.display());

    let bytes = fs::read(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // The WHATWG label "ISO-8859-1" resolves to windows-1252; every
    // byte sequence decodes, so charset handling cannot fail here.
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let index = ColumnIndex::from_headers(&headers)?;
    debug!("Header resolved: {} columns in file", headers.len());

    let progress = if options.show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        Some(pb)
    } else {
        None
    };

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // 1-based data row, accounting for the header line.
        let row_number = i + 2;
        rows.push(parse_row(&record, &index, row_number)?);

        if let Some(ref pb) = progress {
            if rows.len() % 5000 == 0 {
                pb.set_message(format!("{} transactions parsed", rows.len()));
                pb.tick();
            }
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if rows.is_empty() {
        return Err(DataError::Empty {
            path: path.to_path_buf(),
        });
    }

    info!("Loaded {} transactions", rows.len());
    Ok(Dataset::from_rows(rows, path.to_path_buf()))
}

fn parse_row(
    record: &csv::StringRecord,
    index: &ColumnIndex,
    row: usize,
) -> Result<Transaction, DataError> {
    let order_date_raw = field(record, index.order_date, "Order Date", row)?;
    let order_date = parse_date(order_date_raw).ok_or_else(|| DataError::Row {
        row,
        message: format!("unrecognized Order Date '{}'", order_date_raw),
    })?;

    Ok(Transaction::new(
        field(record, index.category, "Category", row)?.to_string(),
        field(record, index.sub_category, "Sub-Category", row)?.to_string(),
        field(record, index.region, "Region", row)?.to_string(),
        field(record, index.segment, "Segment", row)?.to_string(),
        field(record, index.ship_mode, "Ship Mode", row)?.to_string(),
        order_date,
        amount(record, index.sales, "Sales", row)?,
        amount(record, index.profit, "Profit", row)?,
        amount(record, index.discount, "Discount", row)?,
        amount(record, index.shipping_cost, "Shipping Cost", row)?,
    ))
}

fn field<'r>(
    record: &'r csv::StringRecord,
    position: usize,
    name: &str,
    row: usize,
) -> Result<&'r str, DataError> {
    record.get(position).ok_or_else(|| DataError::Row {
        row,
        message: format!("missing value for column '{}'", name),
    })
}

fn amount(
    record: &csv::StringRecord,
    position: usize,
    name: &str,
    row: usize,
) -> Result<f64, DataError> {
    let raw = field(record, position, name, row)?;
    parse_amount(raw).ok_or_else(|| DataError::Row {
        row,
        message: format!("invalid {} value '{}'", name, raw),
    })
}

/// Parse a calendar date in any of the formats the dataset ships with.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Parse a currency or fraction value, tolerating thousands separators
/// and a leading currency sign.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    cleaned.parse::<f64>().ok()
}
