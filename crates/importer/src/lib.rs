//! # SalesCast CSV Importer
//!
//! Reads an uploaded sales CSV into `NewSalesRecord`s ready for storage.
//!
//! The file must have a header row naming the `date`, `product` and `quantity`
//! columns (in any order and letter case; other columns are ignored). Rows are
//! handled leniently: a row with an empty product or a quantity that is not a
//! non-negative whole number is skipped and counted, and dates are kept as
//! written. Dates that the parsing policy cannot read are counted too, since
//! those rows will be left out of every aggregate.

use core_types::{parse_sale_date, NewSalesRecord};
use serde::Serialize;
use std::io::Read;

pub mod error;

pub use error::ImportError;

/// The columns every sales CSV must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = ["date", "product", "quantity"];

/// The outcome of parsing one CSV upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedUpload {
    pub records: Vec<NewSalesRecord>,
    /// Data rows in the file, excluding the header.
    pub rows_read: usize,
    pub rows_skipped: usize,
    /// Kept rows whose date the parsing policy cannot read.
    pub unparseable_dates: usize,
}

struct ColumnIndices {
    date: usize,
    product: usize,
    quantity: usize,
}

/// Parses sales records from CSV data.
pub fn parse_sales_csv<R: Read>(reader: R) -> Result<ParsedUpload, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = locate_columns(&headers)?;

    let mut upload = ParsedUpload {
        records: Vec::new(),
        rows_read: 0,
        rows_skipped: 0,
        unparseable_dates: 0,
    };

    for (index, row) in reader.records().enumerate() {
        let row = row?;
        upload.rows_read += 1;
        // Line 1 is the header.
        let line = index + 2;

        let field = |i: usize| row.get(i).unwrap_or("");
        let product = field(columns.product);
        if product.is_empty() {
            tracing::warn!(line, "Importer: skipping row with empty product");
            upload.rows_skipped += 1;
            continue;
        }

        let Some(quantity) = parse_quantity(field(columns.quantity)) else {
            tracing::warn!(line, quantity = field(columns.quantity), "Importer: skipping row with invalid quantity");
            upload.rows_skipped += 1;
            continue;
        };

        let date = field(columns.date);
        if parse_sale_date(date).is_none() {
            upload.unparseable_dates += 1;
        }

        upload.records.push(NewSalesRecord {
            date: date.to_string(),
            product: product.to_string(),
            quantity,
        });
    }

    tracing::debug!(
        rows_read = upload.rows_read,
        rows_skipped = upload.rows_skipped,
        unparseable_dates = upload.unparseable_dates,
        "Importer: parsed CSV upload"
    );

    Ok(upload)
}

fn locate_columns(headers: &csv::StringRecord) -> Result<ColumnIndices, ImportError> {
    let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    let position = |name: &str| normalized.iter().position(|h| h == name);

    match (position("date"), position("product"), position("quantity")) {
        (Some(date), Some(product), Some(quantity)) => Ok(ColumnIndices {
            date,
            product,
            quantity,
        }),
        _ => Err(ImportError::MissingColumns {
            required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            found: headers.iter().map(|h| h.to_string()).collect(),
        }),
    }
}

/// Accepts whole numbers, including integral decimals such as `3.0`.
fn parse_quantity(raw: &str) -> Option<i64> {
    if let Ok(quantity) = raw.parse::<i64>() {
        return (quantity >= 0).then_some(quantity);
    }

    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Some(0))]
    #[case("42", Some(42))]
    #[case("3.0", Some(3))]
    #[case("-1", None)]
    #[case("2.5", None)]
    #[case("", None)]
    #[case("many", None)]
    #[case("NaN", None)]
    fn quantity_must_be_a_non_negative_whole_number(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_quantity(raw), expected);
    }
}
