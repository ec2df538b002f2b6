//! Lien sheet formatting
//!
//! Reshapes the invoice-filtered contact table into the layout the lien
//! filing team works from. The customer on a job contact is the mechanical
//! contractor, so the MC columns carry the customer fields. Jobs already on
//! the team's sheet are dropped, and ledger entries with no contact record at
//! all come out as placeholder rows flagged for manual entry.

use crate::models::{ArInvoiceLine, InvoiceLedger, JobContact};
use crate::services::identifier;
use serde::Serialize;
use std::collections::HashSet;

const MANUAL_ENTRY: &str = "MANUAL ENTRY REQUIRED";

/// One row of the lien sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LienSheetRow {
    #[serde(rename = "Job Number")]
    pub job_number: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Job Name")]
    pub job_name: Option<String>,
    #[serde(rename = "Owner Name")]
    pub owner_name: Option<String>,
    #[serde(rename = "Owner Address")]
    pub owner_address: Option<String>,
    #[serde(rename = "Owner City")]
    pub owner_city: Option<String>,
    #[serde(rename = "Owner State")]
    pub owner_state: Option<String>,
    #[serde(rename = "Owner Zip")]
    pub owner_zip: Option<String>,
    #[serde(rename = "General Contractor (GC) Name")]
    pub gc_name: Option<String>,
    #[serde(rename = "GC Address")]
    pub gc_address: Option<String>,
    #[serde(rename = "GC City")]
    pub gc_city: Option<String>,
    #[serde(rename = "GC State")]
    pub gc_state: Option<String>,
    #[serde(rename = "GC Zip")]
    pub gc_zip: Option<String>,
    #[serde(rename = "Mechanical Contractor (MC) Name")]
    pub mc_name: Option<String>,
    #[serde(rename = "MC Address")]
    pub mc_address: Option<String>,
    #[serde(rename = "MC City")]
    pub mc_city: Option<String>,
    #[serde(rename = "MC State")]
    pub mc_state: Option<String>,
    #[serde(rename = "MC Zip")]
    pub mc_zip: Option<String>,
}

impl LienSheetRow {
    fn from_contact(contact: &JobContact) -> Self {
        let f = &contact.fields;
        Self {
            job_number: contact.job_id.clone(),
            company: contact.company.as_str().to_string(),
            job_name: f.project_nickname.clone(),
            owner_name: f.owner_name.clone(),
            owner_address: f.owner_address.clone(),
            owner_city: f.owner_city.clone(),
            owner_state: f.owner_state.clone(),
            owner_zip: f.owner_zip.clone(),
            gc_name: f.gc_name.clone(),
            gc_address: f.gc_address.clone(),
            gc_city: f.gc_city.clone(),
            gc_state: f.gc_state.clone(),
            gc_zip: f.gc_zip.clone(),
            mc_name: f.customer_name.clone(),
            mc_address: f.customer_address.clone(),
            mc_city: f.customer_city.clone(),
            mc_state: f.customer_state.clone(),
            mc_zip: f.customer_zip.clone(),
        }
    }

    fn manual_entry(line: &ArInvoiceLine) -> Self {
        Self {
            job_number: identifier::job_id(&line.project_id).to_string(),
            company: MANUAL_ENTRY.to_string(),
            job_name: line.job_name.clone(),
            owner_name: None,
            owner_address: None,
            owner_city: None,
            owner_state: None,
            owner_zip: None,
            gc_name: None,
            gc_address: None,
            gc_city: None,
            gc_state: None,
            gc_zip: None,
            mc_name: None,
            mc_address: None,
            mc_city: None,
            mc_state: None,
            mc_zip: None,
        }
    }
}

/// Ledger entries that never get a manual-entry placeholder: the VRFS and
/// ONCO lines are tracked elsewhere, and `P`/`I` entries are not jobs.
fn excluded_from_manual_entry(project_id: &str) -> bool {
    project_id.contains("VRFS")
        || project_id.contains("ONCO")
        || project_id.starts_with('P')
        || project_id.starts_with('I')
}

/// Build the lien sheet from invoice-filtered contacts.
///
/// Contacts whose job number already appears in `existing_jobs` are dropped.
/// With a variant-A ledger, entries lacking any contact record become
/// placeholder rows; a variant-B ledger contributes no placeholders.
pub fn build_lien_sheet(
    contacts: &[JobContact],
    ledger: &InvoiceLedger,
    existing_jobs: &[String],
) -> Vec<LienSheetRow> {
    let existing: HashSet<&str> = existing_jobs.iter().map(String::as_str).collect();

    let mut rows: Vec<LienSheetRow> = contacts
        .iter()
        .map(LienSheetRow::from_contact)
        .filter(|row| !existing.contains(row.job_number.as_str()))
        .collect();

    if let InvoiceLedger::AccountsReceivable(lines) = ledger {
        let covered: HashSet<&str> = contacts
            .iter()
            .map(|c| c.project_number.as_str())
            .collect();
        let mut appended = 0usize;
        for line in lines {
            if excluded_from_manual_entry(&line.project_id) {
                continue;
            }
            if !covered.contains(line.project_id.as_str()) {
                rows.push(LienSheetRow::manual_entry(line));
                appended += 1;
            }
        }
        if appended > 0 {
            tracing::info!(appended, "Appended manual-entry rows for uncovered ledger entries");
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Company, ContactFields};

    fn contact(project_number: &str, company: Company) -> JobContact {
        JobContact {
            project_number: project_number.to_string(),
            company,
            job_id: identifier::job_id(project_number).to_string(),
            fields: ContactFields {
                project_nickname: Some("Roof Swap".to_string()),
                customer_name: Some("Acme Mechanical".to_string()),
                customer_address: Some("1 Main St".to_string()),
                owner_name: Some("Property LLC".to_string()),
                gc_name: Some("BuildCo".to_string()),
                ..ContactFields::default()
            },
        }
    }

    fn ar_line(project_id: &str, job_name: Option<&str>) -> ArInvoiceLine {
        ArInvoiceLine {
            project_id: project_id.to_string(),
            job_name: job_name.map(str::to_string),
        }
    }

    #[test]
    fn customer_fields_land_in_mc_columns() {
        let rows = build_lien_sheet(
            &[contact("20200001-HTS-1", Company::Hts)],
            &InvoiceLedger::LienExports(vec![]),
            &[],
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].job_number, "20200001");
        assert_eq!(rows[0].company, "HTS");
        assert_eq!(rows[0].mc_name.as_deref(), Some("Acme Mechanical"));
        assert_eq!(rows[0].mc_address.as_deref(), Some("1 Main St"));
        assert_eq!(rows[0].job_name.as_deref(), Some("Roof Swap"));
    }

    #[test]
    fn existing_jobs_are_dropped() {
        let rows = build_lien_sheet(
            &[
                contact("20200001-HTS-1", Company::Hts),
                contact("20200002-HTS-1", Company::Hts),
            ],
            &InvoiceLedger::LienExports(vec![]),
            &["20200001".to_string()],
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].job_number, "20200002");
    }

    #[test]
    fn uncovered_ledger_entries_become_manual_rows() {
        let ledger = InvoiceLedger::AccountsReceivable(vec![
            ar_line("20200001-HTS-1", Some("Covered Job")),
            ar_line("20200009-HTS-1", Some("Orphan Job")),
        ]);
        let rows = build_lien_sheet(&[contact("20200001-HTS-1", Company::Hts)], &ledger, &[]);
        assert_eq!(rows.len(), 2);
        let manual = &rows[1];
        assert_eq!(manual.company, MANUAL_ENTRY);
        assert_eq!(manual.job_number, "20200009");
        assert_eq!(manual.job_name.as_deref(), Some("Orphan Job"));
        assert_eq!(manual.owner_name, None);
    }

    #[test]
    fn vrfs_onco_and_placeholder_entries_never_get_manual_rows() {
        let ledger = InvoiceLedger::AccountsReceivable(vec![
            ar_line("20200003-VRFS-1", None),
            ar_line("20200004-ONCO-1", None),
            ar_line("P1234", None),
            ar_line("I990", None),
        ]);
        let rows = build_lien_sheet(&[], &ledger, &[]);
        assert!(rows.is_empty());
    }
}
