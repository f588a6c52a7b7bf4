use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{AppError, AppResult};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-ish ledger date. Timestamps are accepted and truncated to
/// their calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }

    None
}

/// Bucket key for a calendar month, e.g. "2024-03".
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Bucket key for a calendar day, e.g. "2024-03-05".
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Axis label for a month bucket, e.g. "Mar 2024".
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PeriodType {
    Month,
    Year,
    Custom,
}

/// An inclusive span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::InvalidFilterRange(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Smallest period covering every date, or `None` for no dates.
    pub fn spanning<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().fold(None, |acc, date| match acc {
            None => Some(Self {
                start: date,
                end: date,
            }),
            Some(p) => Some(Self {
                start: p.start.min(date),
                end: p.end.max(date),
            }),
        })
    }

    /// Length in whole days, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The equal-length period ending the day before `start`.
    pub fn comparison_period(&self) -> Self {
        let duration = chrono::Duration::days(self.days());
        Self {
            start: self.start - duration,
            end: self.start - chrono::Duration::days(1),
        }
    }

    pub fn is_single_month(&self) -> bool {
        self.start.year() == self.end.year() && self.start.month() == self.end.month()
    }

    fn detect_period_type(&self) -> PeriodType {
        if self.start == month_start(self.start) && self.end == month_end(self.start) {
            return PeriodType::Month;
        }

        if self.start.ordinal() == 1
            && self.start.year() == self.end.year()
            && self.end.month() == 12
            && self.end.day() == 31
        {
            return PeriodType::Year;
        }

        PeriodType::Custom
    }

    /// Human-readable label, e.g. "March 2024", "2024", "Jan 5 – Feb 2, 2024".
    pub fn display_label(&self) -> String {
        match self.detect_period_type() {
            PeriodType::Month => self.start.format("%B %Y").to_string(),
            PeriodType::Year => self.start.format("%Y").to_string(),
            PeriodType::Custom => {
                let from_fmt = self.start.format("%b %-d");
                if self.start.year() == self.end.year() {
                    format!(
                        "{} – {}, {}",
                        from_fmt,
                        self.end.format("%b %-d"),
                        self.end.format("%Y")
                    )
                } else {
                    format!(
                        "{}, {} – {}, {}",
                        from_fmt,
                        self.start.format("%Y"),
                        self.end.format("%b %-d"),
                        self.end.format("%Y")
                    )
                }
            }
        }
    }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}
