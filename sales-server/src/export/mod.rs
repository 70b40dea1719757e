//! Data export
//!
//! - [`csv::sales_csv`] - sales records as a BOM-prefixed UTF-8 CSV
//! - [`csv::export_filename`] - `sales-data_<YYYY-MM-DD>.csv`

pub mod csv;

pub use csv::{export_filename, sales_csv};

/// MIME type of the CSV download
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
