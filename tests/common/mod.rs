//! Shared test utilities for integration tests.
//!
//! `TestLedger` builds a CSV ledger row by row and turns it into a store or
//! a dashboard session, the same way the view loads `expenses.csv`.

#![allow(dead_code)]

use std::io::Write;

use chrono::NaiveDate;
use spendlens::config::{Config, RowErrorPolicy};
use spendlens::models::Transaction;
use spendlens::{DashboardSession, TransactionStore};
use tempfile::NamedTempFile;

pub struct TestLedger {
    csv: String,
}

impl TestLedger {
    /// A ledger with just the header row.
    pub fn new() -> Self {
        Self {
            csv: String::from("date,category,amount\n"),
        }
    }

    /// The three-row ledger used across the analytics tests:
    /// Food $10 + $5 in January, Rent $20 in February.
    pub fn scenario() -> Self {
        Self::new()
            .row("2024-01-05", "Food", "10")
            .row("2024-01-20", "Food", "5")
            .row("2024-02-01", "Rent", "20")
    }

    pub fn row(mut self, date: &str, category: &str, amount: &str) -> Self {
        let amount = if amount.contains(',') {
            format!("\"{}\"", amount)
        } else {
            amount.to_string()
        };
        self.csv.push_str(&format!("{},{},{}\n", date, category, amount));
        self
    }

    pub fn csv(&self) -> &str {
        &self.csv
    }

    pub fn store(&self) -> TransactionStore {
        TransactionStore::from_csv(self.csv.as_bytes(), RowErrorPolicy::Skip)
            .expect("Failed to load test ledger")
    }

    pub fn session(&self) -> DashboardSession {
        self.session_with(Config::default())
    }

    pub fn session_with(&self, config: Config) -> DashboardSession {
        DashboardSession::new(self.store(), config).expect("Failed to start session")
    }

    /// Write the ledger to a temporary file that lives as long as the handle.
    pub fn write_temp(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(self.csv.as_bytes())
            .expect("Failed to write temp ledger");
        file.flush().expect("Failed to flush temp ledger");
        file
    }
}

impl Default for TestLedger {
    fn default() -> Self {
        Self::new()
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("Invalid test date")
}

pub fn tx(d: &str, category: &str, cents: i64) -> Transaction {
    Transaction::new(date(d), category, cents).expect("Invalid test transaction")
}
