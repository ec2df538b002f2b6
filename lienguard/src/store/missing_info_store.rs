//! Missing-info CSV export and import
//!
//! The classified record set is written to disk between the reconcile run
//! and the notify run, so an operator can inspect or hand-correct it before
//! anything goes out.

use crate::models::MissingInfoRecord;
use lienguard_common::{Error, Result};
use std::path::Path;

pub fn export(path: &Path, records: &[MissingInfoRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| Error::Config(format!("cannot write {}: {e}", path.display())))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), records = records.len(), "Wrote missing-info file");
    Ok(())
}

pub fn import(path: &Path) -> Result<Vec<MissingInfoRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::Config(format!("cannot open {}: {e}", path.display())))?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    tracing::debug!(path = %path.display(), records = records.len(), "Loaded missing-info file");
    Ok(records)
}
