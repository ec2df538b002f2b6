//! Lien sheet CSV export

use crate::services::lien_sheet::LienSheetRow;
use lienguard_common::{Error, Result};
use std::path::Path;

pub fn export(path: &Path, rows: &[LienSheetRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| Error::Config(format!("cannot write {}: {e}", path.display())))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Wrote lien sheet");
    Ok(())
}
