use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::date_utils::Period;
use crate::error::{AppError, AppResult};
use crate::models::Transaction;

/// The active date range and category selection. Never mutated; every user
/// action builds a replacement value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    period: Period,
    selected_categories: BTreeSet<String>,
}

impl FilterState {
    /// An empty `selected_categories` is allowed and selects nothing.
    pub fn new(
        date_from: NaiveDate,
        date_to: NaiveDate,
        selected_categories: BTreeSet<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            period: Period::new(date_from, date_to)?,
            selected_categories,
        })
    }

    pub fn date_from(&self) -> NaiveDate {
        self.period.start
    }

    pub fn date_to(&self) -> NaiveDate {
        self.period.end
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn selected_categories(&self) -> &BTreeSet<String> {
        &self.selected_categories
    }

    pub fn is_selected(&self, category: &str) -> bool {
        self.selected_categories.contains(category)
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.period.contains(transaction.date()) && self.is_selected(transaction.category())
    }

    pub fn with_date_range(&self, date_from: NaiveDate, date_to: NaiveDate) -> AppResult<Self> {
        Self::new(date_from, date_to, self.selected_categories.clone())
    }

    /// Flips one category in or out of the selection. Refuses to deselect
    /// the last remaining category.
    pub fn with_category_toggled(&self, category: &str) -> AppResult<Self> {
        let mut selected = self.selected_categories.clone();
        if !selected.remove(category) {
            selected.insert(category.to_string());
        }
        self.with_categories(selected)
    }

    pub fn with_categories<I, S>(&self, categories: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selected: BTreeSet<String> = categories.into_iter().map(Into::into).collect();
        if selected.is_empty() {
            return Err(AppError::InvalidFilterRange(
                "At least one category must be selected".to_string(),
            ));
        }
        Ok(Self {
            period: self.period,
            selected_categories: selected,
        })
    }
}
