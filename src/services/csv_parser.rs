use crate::error::AppError;
use crate::models::RawRow;
use tracing::{debug, trace, warn};

#[derive(Debug)]
pub struct ParseResult {
    pub rows: Vec<RawRow>,
    pub errors: Vec<String>,
}

/// Reads a `date,category,amount` ledger. Values are passed through as
/// strings; validating them is the store's job. Malformed records are
/// collected in `errors` with their row number.
pub fn parse_csv(content: &[u8]) -> Result<ParseResult, AppError> {
    trace!(content_size = content.len(), "Starting CSV parsing");

    let content_str =
        std::str::from_utf8(content).map_err(|e| AppError::CsvParse(e.to_string()))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content_str.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::CsvParse(e.to_string()))?
        .clone();

    debug!(column_count = headers.len(), "CSV headers parsed");

    let date_col = find_column(&headers, "date")
        .ok_or_else(|| AppError::CsvParse("No date column found in CSV".into()))?;
    let category_col = find_column(&headers, "category")
        .ok_or_else(|| AppError::CsvParse("No category column found in CSV".into()))?;
    let amount_col = find_column(&headers, "amount")
        .ok_or_else(|| AppError::CsvParse("No amount column found in CSV".into()))?;

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (row_idx, result) in reader.records().enumerate() {
        let row_number = row_idx + 2;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                errors.push(format!("Row {}: {}", row_number, e));
                continue;
            }
        };

        if record.iter().all(|field| field.is_empty()) {
            trace!(row_number, "Skipping blank CSV row");
            continue;
        }

        rows.push(RawRow {
            row_number,
            date: get_field(&record, date_col),
            category: get_field(&record, category_col),
            amount: get_field(&record, amount_col),
        });
    }

    if !errors.is_empty() {
        warn!(
            error_count = errors.len(),
            "CSV parsing completed with errors"
        );
    }
    debug!(
        row_count = rows.len(),
        error_count = errors.len(),
        "CSV parsing completed"
    );

    Ok(ParseResult { rows, errors })
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

fn get_field(record: &csv::StringRecord, col: usize) -> String {
    record.get(col).unwrap_or("").trim().to_string()
}
