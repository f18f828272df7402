//! Weekly spreadsheet import feature.
//!
//! The refresh pipeline: parse the first sheet of the uploaded XLSX, run
//! the row validator over every row (invalid rows are skipped, never
//! fatal), reject the upload if nothing validates, replace the stored
//! dataset in one transaction, then broadcast the recomputed current-week
//! set to connected sync clients. No partial import is ever committed or
//! reported.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::ImportService;
