use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::RowErrorPolicy;
use crate::date_utils::Period;
use crate::error::{AppError, AppResult};
use crate::models::{FilterState, RawRow, Transaction};
use crate::services::csv_parser::parse_csv;

/// The session's full, immutable ledger.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    skipped: Vec<String>,
}

impl TransactionStore {
    pub fn load(rows: &[RawRow], policy: RowErrorPolicy) -> AppResult<Self> {
        let mut transactions = Vec::with_capacity(rows.len());
        let mut skipped = Vec::new();

        for row in rows {
            match Transaction::from_raw(row) {
                Ok(tx) => transactions.push(tx),
                Err(e) => match policy {
                    RowErrorPolicy::Reject => {
                        warn!(row = row.row_number, error = %e, "Rejecting ledger");
                        return Err(e);
                    }
                    RowErrorPolicy::Skip => {
                        warn!(row = row.row_number, error = %e, "Skipping ledger row");
                        skipped.push(e.user_message());
                    }
                },
            }
        }

        info!(
            loaded = transactions.len(),
            skipped = skipped.len(),
            "Ledger loaded"
        );

        Ok(Self {
            transactions,
            skipped,
        })
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            skipped: Vec::new(),
        }
    }

    pub fn from_csv(content: &[u8], policy: RowErrorPolicy) -> AppResult<Self> {
        let parsed = parse_csv(content)?;

        if policy == RowErrorPolicy::Reject {
            if let Some(first) = parsed.errors.first() {
                return Err(AppError::CsvParse(first.clone()));
            }
        }

        let mut store = Self::load(&parsed.rows, policy)?;
        let mut skipped = parsed.errors;
        skipped.append(&mut store.skipped);
        store.skipped = skipped;
        Ok(store)
    }

    pub fn from_path(path: &Path, policy: RowErrorPolicy) -> AppResult<Self> {
        debug!(path = %path.display(), "Reading ledger file");
        let content = std::fs::read(path)?;
        Self::from_csv(&content, policy)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Messages for rows dropped under [`RowErrorPolicy::Skip`].
    pub fn skipped_rows(&self) -> &[String] {
        &self.skipped
    }

    pub fn all_categories(&self) -> BTreeSet<String> {
        self.transactions
            .iter()
            .map(|tx| tx.category().to_string())
            .collect()
    }

    pub fn date_bounds(&self) -> AppResult<Period> {
        Period::spanning(self.transactions.iter().map(Transaction::date))
            .ok_or(AppError::EmptyDataset)
    }

    /// Full date range and every category.
    pub fn default_filter(&self) -> AppResult<FilterState> {
        let bounds = self.date_bounds()?;
        FilterState::new(bounds.start, bounds.end, self.all_categories())
    }
}
