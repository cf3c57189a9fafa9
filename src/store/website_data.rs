use std::path::Path;

use crate::domain::WebsiteRecord;

use super::StoreError;

/// Overwrites `path` with a `URL,Text,email` sheet.
pub fn write_website_data(path: &Path, records: &[WebsiteRecord]) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path).map_err(|err| StoreError::csv(path, err))?;
    // serde only emits the header alongside the first record
    if records.is_empty() {
        writer
            .write_record(["URL", "Text", "email"])
            .map_err(|err| StoreError::csv(path, err))?;
    }
    for record in records {
        writer
            .serialize(record)
            .map_err(|err| StoreError::csv(path, err))?;
    }
    writer.flush().map_err(|err| StoreError::io(path, err))?;
    Ok(())
}

/// Reads a `URL,Text,email` sheet. Rows that cannot be read are logged and
/// dropped; the rest are returned in file order.
pub fn read_website_data(path: &Path) -> Result<Vec<WebsiteRecord>, StoreError> {
    let mut reader = super::open_reader(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<WebsiteRecord>() {
        match row {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(target: "store", path = %path.display(), error = %err, "skipping unreadable row");
            }
        }
    }
    Ok(records)
}
