pub mod aggregate;
pub mod filter;
pub mod transaction;

pub use aggregate::{BucketTotal, CategoryShare, Granularity, MonthlyPoint, StackedRow};
pub use filter::FilterState;
pub use transaction::{RawRow, Transaction, MAX_AMOUNT_CENTS, UNCATEGORIZED};
