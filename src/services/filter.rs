use std::collections::BTreeSet;

use tracing::trace;

use crate::date_utils::Period;
use crate::models::{FilterState, Transaction};

/// Transactions inside the filter's date range whose category is selected,
/// in ledger order.
pub fn select_current(all: &[Transaction], state: &FilterState) -> Vec<Transaction> {
    let selected: Vec<Transaction> = all.iter().filter(|tx| state.matches(tx)).cloned().collect();
    trace!(
        candidates = all.len(),
        selected = selected.len(),
        "Selected current window"
    );
    selected
}

/// Transactions inside `period`, ignoring categories.
pub fn select_in_period(all: &[Transaction], period: Period) -> Vec<Transaction> {
    all.iter()
        .filter(|tx| period.contains(tx.date()))
        .cloned()
        .collect()
}

/// The actual span of the current window: its earliest and latest
/// transaction, not the requested range.
pub fn current_window(current: &[Transaction]) -> Option<Period> {
    Period::spanning(current.iter().map(Transaction::date))
}

/// Comparison period derived from the current window. `None` when the
/// window is empty.
pub fn comparison_period(current: &[Transaction]) -> Option<Period> {
    current_window(current).map(|window| window.comparison_period())
}

/// Transactions from the period immediately preceding the current window.
/// With `categories` set to `None` the whole ledger is eligible; otherwise
/// only the given categories are. An empty current window yields nothing.
pub fn select_comparison_baseline(
    all: &[Transaction],
    current: &[Transaction],
    categories: Option<&BTreeSet<String>>,
) -> Vec<Transaction> {
    let Some(period) = comparison_period(current) else {
        return Vec::new();
    };

    all.iter()
        .filter(|tx| period.contains(tx.date()))
        .filter(|tx| categories.map_or(true, |cats| cats.contains(tx.category())))
        .cloned()
        .collect()
}
