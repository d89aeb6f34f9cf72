//! Row-by-row validation against a listing template.

use crate::templates::ImportTemplate;
use std::collections::BTreeMap;

/// A parsed listing row: column name → raw cell value.
pub type Row = BTreeMap<String, String>;

/// One problem found in one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowIssue {
    /// File row number; the header is row 1, so data starts at 2.
    pub row: usize,
    pub field: String,
    pub message: String,
    pub value: String,
}

/// Valid rows split from the issues found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid_rows: Vec<Row>,
    pub issues: Vec<RowIssue>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Validate rows against a template. A row with any issue is excluded
/// from `valid_rows` but later rows are still checked.
pub fn validate_rows(template: &ImportTemplate, rows: &[Row]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 2;
        let issues = validate_row(template, row, row_number);
        if issues.is_empty() {
            report.valid_rows.push(row.clone());
        } else {
            report.issues.extend(issues);
        }
    }
    report
}

fn validate_row(template: &ImportTemplate, row: &Row, row_number: usize) -> Vec<RowIssue> {
    let mut issues = Vec::new();
    for field in &template.fields {
        let value = row
            .get(field.name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        if field.required && value.is_empty() {
            issues.push(RowIssue {
                row: row_number,
                field: field.name.to_string(),
                message: "campo obligatorio vacío".to_string(),
                value,
            });
            continue;
        }
        if let Some(rule) = field.rule {
            if !rule.check(&value) {
                issues.push(RowIssue {
                    row: row_number,
                    field: field.name.to_string(),
                    message: "formato inválido".to_string(),
                    value,
                });
            }
        }
    }
    issues
}
