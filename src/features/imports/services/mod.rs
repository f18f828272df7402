mod import_service;
pub mod row_validator;
pub mod sheet_reader;

pub use import_service::{ImportService, ImportSummary};
