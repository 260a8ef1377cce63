//! Raw transaction import from CSV and JSON files
//!
//! CSV files need a header row. Columns are matched by name (any case):
//! `date`, `description`, `amount` are required, `id` and `merchant` are
//! optional. JSON files hold an array of records, or an object with a
//! `transactions` array.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::RawTransaction;

/// Column positions resolved from a CSV header row
struct Columns {
    id: Option<usize>,
    date: usize,
    description: usize,
    amount: usize,
    merchant: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| Error::Import(format!("Missing column: {}", name)))
        };

        Ok(Self {
            id: find("id"),
            date: require("date")?,
            description: require("description")?,
            amount: require("amount")?,
            merchant: find("merchant"),
        })
    }
}

fn optional_field(record: &StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|i| record.get(i))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse CSV data into raw transactions
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        // header is line 1
        let line = index + 2;

        let date_str = record
            .get(columns.date)
            .ok_or_else(|| Error::Import(format!("Line {}: missing date", line)))?;
        let date = parse_date(date_str)
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;

        let description = record
            .get(columns.description)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Import(format!("Line {}: missing description", line)))?
            .to_string();

        let amount_str = record
            .get(columns.amount)
            .ok_or_else(|| Error::Import(format!("Line {}: missing amount", line)))?;
        let amount = parse_amount(amount_str)
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;

        transactions.push(RawTransaction {
            id: optional_field(&record, columns.id),
            description,
            amount,
            date,
            merchant: optional_field(&record, columns.merchant),
        });
    }

    debug!("Parsed {} CSV transactions", transactions.len());
    Ok(transactions)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonTransactions {
    List(Vec<RawTransaction>),
    Wrapped { transactions: Vec<RawTransaction> },
}

/// Parse JSON data into raw transactions
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let parsed: JsonTransactions = serde_json::from_reader(reader)?;
    let transactions = match parsed {
        JsonTransactions::List(list) => list,
        JsonTransactions::Wrapped { transactions } => transactions,
    };
    debug!("Parsed {} JSON transactions", transactions.len());
    Ok(transactions)
}

/// Load raw transactions from a `.csv` or `.json` file
pub fn load_file(path: &Path) -> Result<Vec<RawTransaction>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let reader = || -> Result<BufReader<File>> { Ok(BufReader::new(File::open(path)?)) };

    match extension.as_deref() {
        Some("csv") => parse_csv(reader()?),
        Some("json") => parse_json(reader()?),
        _ => Err(Error::Import(format!(
            "Unsupported file type: {} (expected .csv or .json)",
            path.display()
        ))),
    }
}

/// Parse a date string in one of the accepted formats
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2026-01-15
        "%d/%m/%Y", // 15/01/2026
        "%d-%m-%Y", // 15-01-2026
        "%Y/%m/%d", // 2026/01/15
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .trim_start_matches("Rs.")
        .trim_start_matches("INR")
        .replace(['₹', '$', ',', ' '], "");

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}
