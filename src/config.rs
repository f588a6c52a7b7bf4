use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// What to do with a ledger row whose date or amount cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowErrorPolicy {
    /// Drop the row, log a warning and keep loading.
    #[default]
    Skip,
    /// Fail the whole load on the first bad row.
    Reject,
}

impl FromStr for RowErrorPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "reject" => Ok(Self::Reject),
            other => Err(AppError::Config(format!(
                "Invalid row error policy '{}': expected 'skip' or 'reject'",
                other
            ))),
        }
    }
}

/// Which categories the comparison baseline is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BaselinePolicy {
    /// Every category in the ledger, regardless of the current selection.
    #[default]
    AllCategories,
    /// Only the categories selected for the current view.
    SameCategories,
}

impl FromStr for BaselinePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::AllCategories),
            "selected" => Ok(Self::SameCategories),
            other => Err(AppError::Config(format!(
                "Invalid baseline policy '{}': expected 'all' or 'selected'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub ledger_path: PathBuf,
    pub row_errors: RowErrorPolicy,
    pub baseline: BaselinePolicy,
    pub average_higher_is_better: bool,
    pub top_categories: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("expenses.csv"),
            row_errors: RowErrorPolicy::default(),
            baseline: BaselinePolicy::default(),
            average_higher_is_better: false,
            top_categories: 3,
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Unset variables
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let row_errors = match lookup("SPENDLENS_ROW_ERRORS") {
            Some(v) => v.parse()?,
            None => defaults.row_errors,
        };

        let baseline = match lookup("SPENDLENS_BASELINE") {
            Some(v) => v.parse()?,
            None => defaults.baseline,
        };

        let average_higher_is_better = match lookup("SPENDLENS_AVERAGE_HIGHER_IS_BETTER") {
            Some(v) => parse_bool(&v).ok_or_else(|| {
                AppError::Config(format!(
                    "Invalid SPENDLENS_AVERAGE_HIGHER_IS_BETTER '{}': expected true or false",
                    v
                ))
            })?,
            None => defaults.average_higher_is_better,
        };

        let top_categories = match lookup("SPENDLENS_TOP_CATEGORIES") {
            Some(v) => v.trim().parse::<usize>().map_err(|_| {
                AppError::Config(format!("Invalid SPENDLENS_TOP_CATEGORIES '{}'", v))
            })?,
            None => defaults.top_categories,
        };

        Ok(Self {
            ledger_path: lookup("SPENDLENS_LEDGER_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.ledger_path),
            row_errors,
            baseline,
            average_higher_is_better,
            top_categories,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
