//! CSV listing import.

use crate::templates::template;
use crate::validate::{validate_rows, Row, ValidationReport};
use crate::DataError;
use std::path::Path;
use tracing::info;

/// Outcome of importing one file against one template.
#[derive(Clone, Debug)]
pub struct ImportReport {
    pub template_key: String,
    pub total_rows: usize,
    pub report: ValidationReport,
}

/// Read a headered CSV file into rows of column → value.
pub fn read_csv(path: &Path) -> Result<Vec<Row>, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.trim().to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Import a CSV listing, validating every row against the template.
pub fn import_csv(template_key: &str, path: &Path) -> Result<ImportReport, DataError> {
    let template = template(template_key)?;
    let rows = read_csv(path)?;
    let report = validate_rows(&template, &rows);
    info!(
        template = template.key,
        total = rows.len(),
        rejected = report.issues.len(),
        "listing imported"
    );
    Ok(ImportReport {
        template_key: template.key.to_string(),
        total_rows: rows.len(),
        report,
    })
}
