use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::date_utils::{day_key, month_key, Period};
use crate::models::Transaction;
use crate::services::analytics::format_cents;

/// A summed bucket keyed by category, month or day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketTotal {
    pub key: String,
    pub total_cents: i64,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total_cents: i64,
    pub percentage: f64,
    pub transaction_count: usize,
}

impl CategoryShare {
    /// Legend line such as `"$20.00 (57.1%)"`.
    pub fn display(&self) -> String {
        format!("{} ({:.1}%)", format_cents(self.total_cents), self.percentage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
}

impl Granularity {
    /// Day buckets when the span sits inside one calendar month, month
    /// buckets otherwise.
    pub fn for_period(period: Period) -> Self {
        if period.is_single_month() {
            Self::Day
        } else {
            Self::Month
        }
    }

    /// Granularity for the span of the given transactions. No transactions
    /// means month buckets.
    pub fn for_transactions(transactions: &[Transaction]) -> Self {
        Period::spanning(transactions.iter().map(Transaction::date))
            .map(Self::for_period)
            .unwrap_or(Self::Month)
    }

    pub fn key(self, date: NaiveDate) -> String {
        match self {
            Self::Day => day_key(date),
            Self::Month => month_key(date),
        }
    }
}

/// One stacked-bar column: every category's total within a time bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackedRow {
    pub bucket: String,
    pub values: BTreeMap<String, i64>,
}

impl StackedRow {
    pub fn total_cents(&self) -> i64 {
        self.values.values().fold(0, |acc, v| acc.saturating_add(*v))
    }

    pub fn value(&self, category: &str) -> i64 {
        self.values.get(category).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub label: String,
    pub total_cents: i64,
}
