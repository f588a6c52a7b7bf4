//! Everything the view renders after a filter change, and the session that
//! owns the ledger and the active filter.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{BaselinePolicy, Config};
use crate::date_utils::Period;
use crate::error::{AppError, AppResult};
use crate::models::{BucketTotal, CategoryShare, FilterState, Granularity, MonthlyPoint, StackedRow};
use crate::services::analytics::{self, format_cents};
use crate::services::comparison::{compute_change, ChangeSummary};
use crate::services::filter;
use crate::services::store::TransactionStore;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    /// Span of the transactions actually shown, not the requested range.
    pub period: Option<Period>,
    pub period_label: Option<String>,
    pub comparison_period: Option<Period>,
    pub total_cents: i64,
    pub total_display: String,
    pub transaction_count: usize,
    pub monthly_average_cents: i64,
    pub monthly_average_display: String,
    pub top_category: Option<CategoryShare>,
    pub top_categories: Vec<CategoryShare>,
    pub total_change: ChangeSummary,
    pub average_change: ChangeSummary,
    pub count_change: ChangeSummary,
    pub category_totals: Vec<CategoryShare>,
    pub monthly_totals: Vec<MonthlyPoint>,
    pub granularity: Granularity,
    pub stacked_rows: Vec<StackedRow>,
    pub daily_totals: Vec<BucketTotal>,
}

impl DashboardData {
    pub fn compute(store: &TransactionStore, state: &FilterState, config: &Config) -> Self {
        let all = store.transactions();
        let current = filter::select_current(all, state);

        let baseline_categories = match config.baseline {
            BaselinePolicy::AllCategories => None,
            BaselinePolicy::SameCategories => Some(state.selected_categories()),
        };
        let baseline = filter::select_comparison_baseline(all, &current, baseline_categories);

        let total_cents = analytics::total(&current);
        let transaction_count = analytics::count(&current);
        let monthly_average_cents = analytics::monthly_average(&current);

        let prev_total = analytics::total(&baseline);
        let prev_count = analytics::count(&baseline);
        let prev_average = analytics::monthly_average(&baseline);

        let category_totals = analytics::category_breakdown(&current);
        let top_categories: Vec<CategoryShare> = category_totals
            .iter()
            .take(config.top_categories)
            .cloned()
            .collect();

        // Stacked rows keep every ledger category, selected or not, so the
        // view can toggle series without asking for a recompute. Bucket size
        // follows the same date-only set, so toggling never reshapes rows.
        let in_range = filter::select_in_period(all, state.period());
        let granularity = Granularity::for_transactions(&in_range);
        let stacked_rows =
            analytics::by_time_bucket_and_category(&in_range, &store.all_categories(), granularity);

        let period = filter::current_window(&current);

        debug!(
            transactions = transaction_count,
            baseline_transactions = baseline.len(),
            ?granularity,
            "Dashboard recomputed"
        );

        Self {
            period,
            period_label: period.map(|p| p.display_label()),
            comparison_period: period.map(|p| p.comparison_period()),
            total_cents,
            total_display: format_cents(total_cents),
            transaction_count,
            monthly_average_cents,
            monthly_average_display: format_cents(monthly_average_cents),
            top_category: category_totals.first().cloned(),
            top_categories,
            total_change: compute_change(total_cents as f64, prev_total as f64, false).into(),
            average_change: compute_change(
                monthly_average_cents as f64,
                prev_average as f64,
                config.average_higher_is_better,
            )
            .into(),
            count_change: compute_change(transaction_count as f64, prev_count as f64, false)
                .into(),
            category_totals,
            monthly_totals: analytics::monthly_series(&current),
            granularity,
            stacked_rows,
            daily_totals: analytics::by_day(&current),
        }
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One browsing session: the loaded ledger, the active filter and the last
/// dashboard that was successfully computed.
#[derive(Debug)]
pub struct DashboardSession {
    store: TransactionStore,
    config: Config,
    filter: FilterState,
    data: DashboardData,
}

impl DashboardSession {
    /// Seeds the filter with the ledger's full date range and every category.
    pub fn new(store: TransactionStore, config: Config) -> AppResult<Self> {
        let filter = store.default_filter()?;
        let data = DashboardData::compute(&store, &filter, &config);

        info!(
            transactions = store.len(),
            from = %filter.date_from(),
            to = %filter.date_to(),
            "Dashboard session started"
        );

        Ok(Self {
            store,
            config,
            filter,
            data,
        })
    }

    /// Loads the ledger named by `config.ledger_path` and starts a session.
    ///
    /// ```no_run
    /// use spendlens::config::Config;
    /// use spendlens::{logging, DashboardSession};
    ///
    /// fn main() -> spendlens::error::AppResult<()> {
    ///     logging::init();
    ///     let session = DashboardSession::from_config(Config::from_env()?)?;
    ///     println!("{}", session.data().to_json()?);
    ///     Ok(())
    /// }
    /// ```
    pub fn from_config(config: Config) -> AppResult<Self> {
        let store = TransactionStore::from_path(&config.ledger_path, config.row_errors)?;
        Self::new(store, config)
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn apply_date_range(&mut self, from: NaiveDate, to: NaiveDate) -> AppResult<&DashboardData> {
        let next = self.filter.with_date_range(from, to);
        self.replace_filter(next)
    }

    /// Applies date-picker values in `YYYY-MM-DD` form.
    pub fn apply_date_strings(&mut self, from: &str, to: &str) -> AppResult<&DashboardData> {
        let (from_date, to_date) = match (
            NaiveDate::parse_from_str(from.trim(), "%Y-%m-%d"),
            NaiveDate::parse_from_str(to.trim(), "%Y-%m-%d"),
        ) {
            (Ok(f), Ok(t)) => (f, t),
            _ => {
                let err = AppError::InvalidFilterRange(format!(
                    "Invalid date range '{}' to '{}'",
                    from, to
                ));
                warn!(error = %err, "Filter rejected");
                return Err(err);
            }
        };
        self.apply_date_range(from_date, to_date)
    }

    pub fn toggle_category(&mut self, category: &str) -> AppResult<&DashboardData> {
        let next = self.filter.with_category_toggled(category);
        self.replace_filter(next)
    }

    pub fn set_categories<I, S>(&mut self, categories: I) -> AppResult<&DashboardData>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next = self.filter.with_categories(categories);
        self.replace_filter(next)
    }

    fn replace_filter(&mut self, next: AppResult<FilterState>) -> AppResult<&DashboardData> {
        let next = match next {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "Filter rejected, keeping previous view");
                return Err(e);
            }
        };

        self.data = DashboardData::compute(&self.store, &next, &self.config);
        self.filter = next;
        Ok(&self.data)
    }
}
