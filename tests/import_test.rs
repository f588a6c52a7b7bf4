//! Integration tests for loading ledgers from disk.

mod common;

use std::path::PathBuf;

use common::{date, TestLedger};
use spendlens::config::{Config, RowErrorPolicy};
use spendlens::error::AppError;
use spendlens::services::analytics;
use spendlens::{DashboardSession, TransactionStore};

fn ledger_with_bad_rows() -> TestLedger {
    TestLedger::new()
        .row("2024-03-01", "Food", "$12.50")
        .row("not a date", "Food", "3")
        .row("2024-03-02", "Rent", "$1,200.00")
        .row("2024-03-03", "Fun", "-4")
        .row("2024-03-04", "", "7")
}

#[test]
fn test_from_path_reads_ledger() {
    let file = TestLedger::scenario().write_temp();
    let store = TransactionStore::from_path(file.path(), RowErrorPolicy::Skip).unwrap();

    assert_eq!(store.len(), 3);
    assert!(store.skipped_rows().is_empty());
    assert_eq!(store.transactions()[0].date(), date("2024-01-05"));
    assert_eq!(store.transactions()[2].amount_cents(), 2000);
}

#[test]
fn test_skip_policy_reports_bad_rows() {
    let file = ledger_with_bad_rows().write_temp();
    let store = TransactionStore::from_path(file.path(), RowErrorPolicy::Skip).unwrap();

    assert_eq!(store.len(), 3);
    let amounts: Vec<i64> = store.transactions().iter().map(|t| t.amount_cents()).collect();
    assert_eq!(amounts, vec![1250, 120000, 700]);
    assert_eq!(store.transactions()[2].category(), "Uncategorized");

    let skipped = store.skipped_rows();
    assert_eq!(skipped.len(), 2);
    assert!(skipped[0].starts_with("Row 3"));
    assert!(skipped[1].starts_with("Row 5"));
}

#[test]
fn test_reject_policy_fails_on_first_bad_row() {
    let file = ledger_with_bad_rows().write_temp();
    let result = TransactionStore::from_path(file.path(), RowErrorPolicy::Reject);

    match result {
        Err(AppError::Parse { row, .. }) => assert_eq!(row, 3),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_oversized_amounts_follow_row_policy() {
    let ledger = TestLedger::new()
        .row("2024-01-01", "Food", "1e17")
        .row("2024-01-02", "Food", "1e17")
        .row("2024-01-03", "Food", "$25.00");

    let store = ledger.store();
    assert_eq!(store.len(), 1);
    assert_eq!(store.skipped_rows().len(), 2);
    assert!(store.skipped_rows()[0].starts_with("Row 2"));
    assert_eq!(analytics::total(store.transactions()), 2500);

    let result = TransactionStore::from_csv(ledger.csv().as_bytes(), RowErrorPolicy::Reject);
    assert!(matches!(result, Err(AppError::Parse { row: 2, .. })));
}

#[test]
fn test_header_only_ledger_has_no_data() {
    let file = TestLedger::new().write_temp();
    let store = TransactionStore::from_path(file.path(), RowErrorPolicy::Skip).unwrap();
    assert!(store.is_empty());

    let err = DashboardSession::new(store, Config::default()).unwrap_err();
    assert!(matches!(err, AppError::EmptyDataset));
    assert_eq!(err.user_message(), "No data");
}

#[test]
fn test_missing_columns_are_rejected() {
    let result = TransactionStore::from_csv(b"when,what\n2024-01-01,Food\n", RowErrorPolicy::Skip);
    assert!(matches!(result, Err(AppError::CsvParse(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = TransactionStore::from_path(
        &PathBuf::from("/nonexistent/spendlens/ledger.csv"),
        RowErrorPolicy::Skip,
    );
    assert!(matches!(result, Err(AppError::Io(_))));
}

#[test]
fn test_session_from_config_path() {
    let file = TestLedger::scenario()
        .row("2024-02-10", "Food", "1,000")
        .write_temp();
    let config = Config {
        ledger_path: file.path().to_path_buf(),
        ..Config::default()
    };

    let session = DashboardSession::from_config(config).unwrap();
    let data = session.data();
    assert_eq!(data.transaction_count, 4);
    assert_eq!(data.total_cents, 103500);
    assert_eq!(data.total_display, "$1,035.00");
    assert_eq!(data.top_category.as_ref().unwrap().category, "Food");
    assert_eq!(session.filter().date_to(), date("2024-02-10"));
}
