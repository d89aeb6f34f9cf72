#![deny(warnings)]

//! CSV listing import/export for the factory's master data.
//!
//! Imports are driven by named templates (fabrics, materials, suppliers,
//! customers) that declare required columns and per-field format rules;
//! every import yields a row-by-row validation report instead of failing
//! on the first bad cell.

use thiserror::Error;

mod export;
mod import;
mod templates;
mod validate;

pub use export::{export_listing_csv, export_template_csv};
pub use import::{import_csv, read_csv, ImportReport};
pub use templates::{template, templates, ImportTemplate, Rule, TemplateField};
pub use validate::{validate_rows, Row, RowIssue, ValidationReport};

/// Errors for template lookup and file handling.
#[derive(Debug, Error)]
pub enum DataError {
    /// The requested template key does not exist.
    #[error("plantilla desconocida: {requested}. disponibles: {available}")]
    UnknownTemplate { requested: String, available: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
