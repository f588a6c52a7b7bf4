pub mod analytics;
pub mod comparison;
pub mod csv_parser;
pub mod dashboard;
pub mod filter;
pub mod store;
