//! CSV listing export.

use crate::templates::template;
use crate::validate::Row;
use crate::DataError;
use std::path::Path;

/// Write a header-only CSV for a template, ready to be filled in.
pub fn export_template_csv(template_key: &str, path: &Path) -> Result<(), DataError> {
    let template = template(template_key)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(template.header())?;
    writer.flush()?;
    Ok(())
}

/// Write a listing with headers inferred as the first-seen union of the
/// record keys. Missing cells are written blank.
pub fn export_listing_csv(records: &[Row], path: &Path) -> Result<(), DataError> {
    let mut headers: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&headers)?;
    for record in records {
        let cells: Vec<&str> = headers
            .iter()
            .map(|h| record.get(*h).map(String::as_str).unwrap_or(""))
            .collect();
        writer.write_record(&cells)?;
    }
    writer.flush()?;
    Ok(())
}
