use chrono::NaiveDate;
use serde::Serialize;

use crate::date_utils::parse_date;
use crate::error::{AppError, AppResult};
use crate::services::analytics::format_cents;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Largest accepted amount: $1 trillion. Ledger totals up to this size times
/// ~92,000 rows still fit in `i64` cents.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000_000;

/// A ledger row as read from the source file, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row_number: usize,
    pub date: String,
    pub category: String,
    pub amount: String,
}

impl RawRow {
    pub fn new(
        row_number: usize,
        date: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            row_number,
            date: date.into(),
            category: category.into(),
            amount: amount.into(),
        }
    }
}

/// A single expense. Immutable once loaded; the amount is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    date: NaiveDate,
    category: String,
    amount_cents: i64,
}

impl Transaction {
    pub fn new(date: NaiveDate, category: impl Into<String>, amount_cents: i64) -> AppResult<Self> {
        if amount_cents < 0 {
            return Err(AppError::InvalidAmount(format!(
                "{} is negative",
                format_cents(amount_cents)
            )));
        }
        if amount_cents > MAX_AMOUNT_CENTS {
            return Err(AppError::InvalidAmount(format!(
                "{} exceeds the maximum of {}",
                format_cents(amount_cents),
                format_cents(MAX_AMOUNT_CENTS)
            )));
        }

        let category = category.into();
        let category = match category.trim() {
            "" => UNCATEGORIZED.to_string(),
            trimmed => trimmed.to_string(),
        };

        Ok(Self {
            date,
            category,
            amount_cents,
        })
    }

    pub fn from_raw(row: &RawRow) -> AppResult<Self> {
        let date = parse_date(&row.date).ok_or_else(|| {
            if row.date.trim().is_empty() {
                AppError::parse(row.row_number, "Missing date")
            } else {
                AppError::parse(row.row_number, format!("Invalid date '{}'", row.date))
            }
        })?;

        let amount_cents =
            parse_amount_cents(&row.amount).map_err(|msg| AppError::parse(row.row_number, msg))?;

        Self::new(date, row.category.as_str(), amount_cents)
            .map_err(|e| AppError::parse(row.row_number, e.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    pub fn amount_formatted(&self) -> String {
        format_cents(self.amount_cents)
    }
}

/// Parse a currency literal such as `"$1,234.50"` into cents. Negative,
/// non-finite, non-numeric and above-[`MAX_AMOUNT_CENTS`] values are rejected.
pub fn parse_amount_cents(amount: &str) -> Result<i64, String> {
    let cleaned: String = amount
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err("Missing amount".to_string());
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| format!("Invalid amount '{}'", amount.trim()))?;

    if !value.is_finite() {
        return Err(format!("Invalid amount '{}'", amount.trim()));
    }
    if value < 0.0 {
        return Err(format!("Negative amount '{}'", amount.trim()));
    }

    let cents = (value * 100.0).round();
    if cents > MAX_AMOUNT_CENTS as f64 {
        return Err(format!("Amount '{}' is too large", amount.trim()));
    }

    Ok(cents as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_amount_strips_currency_punctuation() {
        assert_eq!(parse_amount_cents("$50.00"), Ok(5000));
        assert_eq!(parse_amount_cents("1,234.56"), Ok(123456));
        assert_eq!(parse_amount_cents(" $1,000 "), Ok(100000));
        assert_eq!(parse_amount_cents("0"), Ok(0));
        assert_eq!(parse_amount_cents("12.5"), Ok(1250));
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        assert!(parse_amount_cents("").is_err());
        assert!(parse_amount_cents("$").is_err());
        assert!(parse_amount_cents("abc").is_err());
        assert!(parse_amount_cents("NaN").is_err());
        assert!(parse_amount_cents("inf").is_err());
        assert!(parse_amount_cents("-5.00").is_err());
        assert!(parse_amount_cents("-$5.00").is_err());
    }

    #[test]
    fn test_parse_amount_rejects_huge_values() {
        assert_eq!(parse_amount_cents("1,000,000,000,000"), Ok(MAX_AMOUNT_CENTS));
        assert!(parse_amount_cents("1,000,000,000,000.01").is_err());
        assert!(parse_amount_cents("1e17").is_err());
        assert!(parse_amount_cents("1e300").is_err());

        let result = Transaction::new(d("2024-01-01"), "Food", i64::MAX);
        assert!(matches!(result, Err(AppError::InvalidAmount(_))));

        let err = Transaction::from_raw(&RawRow::new(4, "2024-01-05", "Food", "1e17")).unwrap_err();
        assert!(matches!(err, AppError::Parse { row: 4, .. }));
    }

    #[test]
    fn test_new_rejects_negative_amount() {
        let result = Transaction::new(d("2024-01-01"), "Food", -1);
        assert!(matches!(result, Err(AppError::InvalidAmount(_))));
    }

    #[test]
    fn test_new_defaults_blank_category() {
        let tx = Transaction::new(d("2024-01-01"), "  ", 100).unwrap();
        assert_eq!(tx.category(), UNCATEGORIZED);
        let tx = Transaction::new(d("2024-01-01"), " Food ", 100).unwrap();
        assert_eq!(tx.category(), "Food");
    }

    #[test]
    fn test_from_raw() {
        let tx = Transaction::from_raw(&RawRow::new(2, "2024-01-05", "Food", "$10.50")).unwrap();
        assert_eq!(tx.date(), d("2024-01-05"));
        assert_eq!(tx.category(), "Food");
        assert_eq!(tx.amount_cents(), 1050);
        assert_eq!(tx.amount_formatted(), "$10.50");
    }

    #[test]
    fn test_from_raw_reports_row_number() {
        let err = Transaction::from_raw(&RawRow::new(7, "not a date", "Food", "1")).unwrap_err();
        match err {
            AppError::Parse { row, message } => {
                assert_eq!(row, 7);
                assert!(message.contains("Invalid date"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = Transaction::from_raw(&RawRow::new(3, "2024-01-05", "Food", "-2")).unwrap_err();
        assert!(matches!(err, AppError::Parse { row: 3, .. }));
    }
}
