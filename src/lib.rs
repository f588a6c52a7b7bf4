pub mod config;
pub mod date_utils;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use services::dashboard::{DashboardData, DashboardSession};
pub use services::store::TransactionStore;
