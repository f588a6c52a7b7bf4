use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

use chrono::NaiveDate;

use crate::date_utils::{day_key, month_key, month_label};
use crate::models::{BucketTotal, CategoryShare, Granularity, MonthlyPoint, StackedRow, Transaction};

/// Groups `items` by `key_fn` and folds each group with `reduce_fn`,
/// starting from `V::default()`. Groups come back in the order their key
/// was first seen; empty input gives an empty result.
pub fn group_and_aggregate<T, K, V, KF, RF>(items: &[T], key_fn: KF, reduce_fn: RF) -> Vec<(K, V)>
where
    K: Eq + Hash + Clone,
    V: Default,
    KF: Fn(&T) -> K,
    RF: Fn(&mut V, &T),
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, V)> = Vec::new();

    for item in items {
        let key = key_fn(item);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, V::default()));
                groups.len() - 1
            }
        };
        reduce_fn(&mut groups[slot].1, item);
    }

    groups
}

#[derive(Debug, Default)]
struct Tally {
    total_cents: i64,
    count: usize,
}

fn bucket_totals<KF>(transactions: &[Transaction], key_fn: KF) -> Vec<BucketTotal>
where
    KF: Fn(&Transaction) -> String,
{
    group_and_aggregate(transactions, key_fn, |tally: &mut Tally, tx| {
        tally.total_cents = tally.total_cents.saturating_add(tx.amount_cents());
        tally.count += 1;
    })
    .into_iter()
    .map(|(key, tally)| BucketTotal {
        key,
        total_cents: tally.total_cents,
        transaction_count: tally.count,
    })
    .collect()
}

/// Saturates at `i64::MAX` rather than wrapping.
pub fn total(transactions: &[Transaction]) -> i64 {
    saturating_sum(transactions.iter().map(Transaction::amount_cents))
}

pub fn count(transactions: &[Transaction]) -> usize {
    transactions.len()
}

/// Totals per category, in first-seen order.
pub fn by_category(transactions: &[Transaction]) -> Vec<BucketTotal> {
    bucket_totals(transactions, |tx| tx.category().to_string())
}

/// Every category ranked by total, largest first. Ties keep first-seen
/// order. Percentages are of the overall total, or 0 when that is 0.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let total = total(transactions);

    let mut result: Vec<CategoryShare> = by_category(transactions)
        .into_iter()
        .map(|bucket| CategoryShare {
            category: bucket.key,
            total_cents: bucket.total_cents,
            percentage: percent_of(bucket.total_cents, total),
            transaction_count: bucket.transaction_count,
        })
        .collect();

    result.sort_by(|a, b| b.total_cents.cmp(&a.total_cents));
    result
}

pub fn top_categories(transactions: &[Transaction], n: usize) -> Vec<CategoryShare> {
    let mut ranked = category_breakdown(transactions);
    ranked.truncate(n);
    ranked
}

/// Totals per `YYYY-MM`, chronological.
pub fn by_month(transactions: &[Transaction]) -> Vec<BucketTotal> {
    let mut months = bucket_totals(transactions, |tx| month_key(tx.date()));
    months.sort_by(|a, b| a.key.cmp(&b.key));
    months
}

/// Mean of the monthly totals, rounded to the cent. 0 with no months.
pub fn monthly_average(transactions: &[Transaction]) -> i64 {
    let months = by_month(transactions);
    if months.is_empty() {
        return 0;
    }
    let sum = saturating_sum(months.iter().map(|m| m.total_cents));
    (sum as f64 / months.len() as f64).round() as i64
}

/// Month totals with a display label for the bar chart axis.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyPoint> {
    by_month(transactions)
        .into_iter()
        .map(|bucket| {
            let label = NaiveDate::parse_from_str(&format!("{}-01", bucket.key), "%Y-%m-%d")
                .map(month_label)
                .unwrap_or_else(|_| bucket.key.clone());
            MonthlyPoint {
                month: bucket.key,
                label,
                total_cents: bucket.total_cents,
            }
        })
        .collect()
}

/// Totals per `YYYY-MM-DD`, chronological. Days without spending are absent.
pub fn by_day(transactions: &[Transaction]) -> Vec<BucketTotal> {
    let mut days = bucket_totals(transactions, |tx| day_key(tx.date()));
    days.sort_by(|a, b| a.key.cmp(&b.key));
    days
}

/// One row per time bucket, chronological. Each row holds a value for every
/// category in `categories` (0 when the bucket has none), plus any category
/// that appears in the data but was not listed.
pub fn by_time_bucket_and_category(
    transactions: &[Transaction],
    categories: &BTreeSet<String>,
    granularity: Granularity,
) -> Vec<StackedRow> {
    let template: BTreeMap<String, i64> = categories.iter().map(|c| (c.clone(), 0)).collect();

    let mut rows: Vec<StackedRow> = group_and_aggregate(
        transactions,
        |tx| granularity.key(tx.date()),
        |sums: &mut BTreeMap<String, i64>, tx| {
            let sum = sums.entry(tx.category().to_string()).or_insert(0);
            *sum = sum.saturating_add(tx.amount_cents());
        },
    )
    .into_iter()
    .map(|(bucket, sums)| {
        let mut values = template.clone();
        for (category, cents) in sums {
            let value = values.entry(category).or_insert(0);
            *value = value.saturating_add(cents);
        }
        StackedRow { bucket, values }
    })
    .collect();

    rows.sort_by(|a, b| a.bucket.cmp(&b.bucket));
    rows
}

fn saturating_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

fn percent_of(part: i64, whole: i64) -> f64 {
    if whole > 0 {
        (part as f64 / whole as f64) * 100.0
    } else {
        0.0
    }
}

/// Formats cents as dollars with thousands separators, e.g. `"$1,234.50"`.
pub fn format_cents(cents: i64) -> String {
    let is_negative = cents < 0;
    let abs_cents = cents.unsigned_abs();
    let dollars = (abs_cents / 100).to_string();
    let remainder = abs_cents % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if is_negative {
        format!("-${}.{:02}", grouped, remainder)
    } else {
        format!("${}.{:02}", grouped, remainder)
    }
}
