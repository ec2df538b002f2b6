//! CSV input loaders
//!
//! Every input table arrives as a CSV export from some other system; these
//! loaders turn them into typed tables and reject files whose headers do not
//! match a known shape. A missing or unreadable file is a configuration
//! problem and fails immediately.

use crate::models::{ArInvoiceLine, ContactRow, DirectoryEntry, InvoiceLedger, ProjectRegistry};
use lienguard_common::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::Reader::from_path(path).map_err(|e| {
        Error::Config(format!("cannot open {}: {e}", path.display()))
    })
}

/// Load one company's contact export.
pub fn load_contacts(path: &Path) -> Result<Vec<ContactRow>> {
    let mut reader = open_reader(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    tracing::debug!(path = %path.display(), rows = rows.len(), "Loaded contact file");
    Ok(rows)
}

/// Load an invoice ledger, detecting its schema from the header row.
///
/// A header carrying `Project ID` is an accounts-receivable export; failing
/// that, `order_no` marks a lien-exports file. Anything else is an
/// unrecognized schema. The `Job Name`/`Project Title` column, when present,
/// is captured for lien-sheet placeholder rows.
pub fn load_ledger(path: &Path) -> Result<InvoiceLedger> {
    let mut reader = open_reader(path)?;
    let headers = reader.headers()?.clone();

    if let Some(id_col) = headers.iter().position(|h| h == "Project ID") {
        let name_col = headers
            .iter()
            .position(|h| h == "Job Name" || h == "Project Title");
        let mut lines = Vec::new();
        for record in reader.records() {
            let record = record?;
            let project_id = record.get(id_col).unwrap_or_default().to_string();
            if project_id.is_empty() {
                continue;
            }
            let job_name = name_col
                .and_then(|c| record.get(c))
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            lines.push(ArInvoiceLine { project_id, job_name });
        }
        tracing::debug!(path = %path.display(), entries = lines.len(), "Loaded accounts-receivable ledger");
        return Ok(InvoiceLedger::AccountsReceivable(lines));
    }

    if let Some(order_col) = headers.iter().position(|h| h == "order_no") {
        let mut orders = Vec::new();
        for record in reader.records() {
            let record = record?;
            let order = record.get(order_col).unwrap_or_default().to_string();
            if !order.is_empty() {
                orders.push(order);
            }
        }
        tracing::debug!(path = %path.display(), entries = orders.len(), "Loaded lien-exports ledger");
        return Ok(InvoiceLedger::LienExports(orders));
    }

    Err(Error::Config(format!(
        "{}: unrecognized invoice ledger schema (expected a Project ID or order_no column)",
        path.display()
    )))
}

#[derive(Debug, Deserialize)]
struct RegistryRow {
    #[serde(rename = "Project ID")]
    project_id: String,
    #[serde(rename = "Leader")]
    leader: Option<String>,
}

/// Load the project registry. A blank leader cell means the project is
/// registered but unassigned.
pub fn load_registry(path: &Path) -> Result<ProjectRegistry> {
    let mut reader = open_reader(path)?;
    let mut leaders: HashMap<String, Option<String>> = HashMap::new();
    for row in reader.deserialize() {
        let row: RegistryRow = row?;
        let leader = row.leader.filter(|l| !l.trim().is_empty());
        leaders.insert(row.project_id, leader);
    }
    tracing::debug!(path = %path.display(), projects = leaders.len(), "Loaded project registry");
    Ok(ProjectRegistry::new(leaders))
}

/// Load the personnel directory.
pub fn load_directory(path: &Path) -> Result<Vec<DirectoryEntry>> {
    let mut reader = open_reader(path)?;
    let mut entries = Vec::new();
    for row in reader.deserialize() {
        entries.push(row?);
    }
    tracing::debug!(path = %path.display(), entries = entries.len(), "Loaded personnel directory");
    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct ExistingJobRow {
    #[serde(rename = "Job Number")]
    job_number: String,
}

/// Load the lien team's existing-jobs table.
pub fn load_existing_jobs(path: &Path) -> Result<Vec<String>> {
    let mut reader = open_reader(path)?;
    let mut jobs = Vec::new();
    for row in reader.deserialize() {
        let row: ExistingJobRow = row?;
        jobs.push(row.job_number);
    }
    tracing::debug!(path = %path.display(), jobs = jobs.len(), "Loaded existing-jobs table");
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn ledger_detects_variant_a_with_job_name() {
        let file = write_temp(
            "Project ID,Job Name\n20200001-HTS-1,Roof Swap\nP1234,\n",
        );
        let ledger = load_ledger(file.path()).unwrap();
        match ledger {
            InvoiceLedger::AccountsReceivable(lines) => {
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[0].project_id, "20200001-HTS-1");
                assert_eq!(lines[0].job_name.as_deref(), Some("Roof Swap"));
                assert_eq!(lines[1].job_name, None);
            }
            other => panic!("expected variant A, got {other:?}"),
        }
    }

    #[test]
    fn ledger_detects_variant_a_before_variant_b() {
        let file = write_temp("Project ID,order_no\n20200001-HTS-1,999\n");
        let ledger = load_ledger(file.path()).unwrap();
        assert!(matches!(ledger, InvoiceLedger::AccountsReceivable(_)));
    }

    #[test]
    fn ledger_detects_variant_b() {
        let file = write_temp("order_no,amount\n20200003-ONCO-1,12.50\n");
        let ledger = load_ledger(file.path()).unwrap();
        assert_eq!(
            ledger,
            InvoiceLedger::LienExports(vec!["20200003-ONCO-1".to_string()])
        );
    }

    #[test]
    fn unrecognized_ledger_schema_is_a_config_error() {
        let file = write_temp("Invoice,Amount\nX,1\n");
        let err = load_ledger(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn registry_blank_leader_is_unassigned() {
        let file = write_temp(
            "Project ID,Leader\n20200001-HTS-1,Jane Doe\n20200002-HTS-1,\n",
        );
        let registry = load_registry(file.path()).unwrap();
        assert_eq!(registry.leader_of("20200001-HTS-1"), Some("Jane Doe"));
        assert_eq!(registry.leader_of("20200002-HTS-1"), None);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_contacts(Path::new("/nonexistent/contacts.csv")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
