//! Contact records through the pipeline stages
//!
//! Each stage returns a more constrained type: `ContactRow` is the raw CSV
//! contract, `JobContact` is merged and deduplicated, `AssignedContact` has a
//! leader, `EnrichedContact` has a leader e-mail, and `MissingInfoRecord` is
//! the final classified shape with an optional reference URL.

use super::Company;
use serde::{Deserialize, Serialize};

/// One row of a per-company contact export file.
///
/// Column names match the export's headers exactly; the phone columns for GC
/// and Owner are present in some export variants only.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRow {
    #[serde(rename = "Project Number")]
    pub project_number: String,
    #[serde(rename = "Project Nickname", default)]
    pub project_nickname: Option<String>,
    #[serde(rename = "Customer Name", default)]
    pub customer_name: Option<String>,
    #[serde(rename = "Customer Phone", default)]
    pub customer_phone: Option<String>,
    #[serde(rename = "Customer Address", default)]
    pub customer_address: Option<String>,
    #[serde(rename = "Customer City", default)]
    pub customer_city: Option<String>,
    #[serde(rename = "Customer State", default)]
    pub customer_state: Option<String>,
    #[serde(rename = "Customer Zip", default)]
    pub customer_zip: Option<String>,
    #[serde(rename = "Customer Role", default)]
    pub customer_role: Option<String>,
    #[serde(rename = "GC Name", default)]
    pub gc_name: Option<String>,
    #[serde(rename = "GC Address", default)]
    pub gc_address: Option<String>,
    #[serde(rename = "GC City", default)]
    pub gc_city: Option<String>,
    #[serde(rename = "GC State", default)]
    pub gc_state: Option<String>,
    #[serde(rename = "GC Zip", default)]
    pub gc_zip: Option<String>,
    #[serde(rename = "GC Phone", default)]
    pub gc_phone: Option<String>,
    #[serde(rename = "Owner Name", default)]
    pub owner_name: Option<String>,
    #[serde(rename = "Owner Address", default)]
    pub owner_address: Option<String>,
    #[serde(rename = "Owner City", default)]
    pub owner_city: Option<String>,
    #[serde(rename = "Owner State", default)]
    pub owner_state: Option<String>,
    #[serde(rename = "Owner Zip", default)]
    pub owner_zip: Option<String>,
    #[serde(rename = "Owner Phone", default)]
    pub owner_phone: Option<String>,
}

/// Coerce blank-ish markers to an explicit absent value.
///
/// The exports use `""` and `" "` interchangeably for "not filled in"; both
/// must classify as missing downstream.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    match value {
        Some(v) if v.is_empty() || v == " " => None,
        other => other,
    }
}

/// Contact detail fields carried from merge through classification.
///
/// GC Phone and Owner Phone are dropped here: nothing downstream reads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFields {
    pub project_nickname: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub customer_zip: Option<String>,
    pub customer_role: Option<String>,
    pub gc_name: Option<String>,
    pub gc_address: Option<String>,
    pub gc_city: Option<String>,
    pub gc_state: Option<String>,
    pub gc_zip: Option<String>,
    pub owner_name: Option<String>,
    pub owner_address: Option<String>,
    pub owner_city: Option<String>,
    pub owner_state: Option<String>,
    pub owner_zip: Option<String>,
}

impl ContactFields {
    /// Build from a raw row, coercing blank-ish values to absent.
    pub fn from_row(row: ContactRow) -> Self {
        Self {
            project_nickname: blank_to_none(row.project_nickname),
            customer_name: blank_to_none(row.customer_name),
            customer_phone: blank_to_none(row.customer_phone),
            customer_address: blank_to_none(row.customer_address),
            customer_city: blank_to_none(row.customer_city),
            customer_state: blank_to_none(row.customer_state),
            customer_zip: blank_to_none(row.customer_zip),
            customer_role: blank_to_none(row.customer_role),
            gc_name: blank_to_none(row.gc_name),
            gc_address: blank_to_none(row.gc_address),
            gc_city: blank_to_none(row.gc_city),
            gc_state: blank_to_none(row.gc_state),
            gc_zip: blank_to_none(row.gc_zip),
            owner_name: blank_to_none(row.owner_name),
            owner_address: blank_to_none(row.owner_address),
            owner_city: blank_to_none(row.owner_city),
            owner_state: blank_to_none(row.owner_state),
            owner_zip: blank_to_none(row.owner_zip),
        }
    }

    /// Owner-prefixed fields checked by the classifier.
    pub fn owner_fields(&self) -> [&Option<String>; 5] {
        [
            &self.owner_name,
            &self.owner_address,
            &self.owner_city,
            &self.owner_state,
            &self.owner_zip,
        ]
    }

    /// GC-prefixed fields checked by the classifier.
    pub fn gc_fields(&self) -> [&Option<String>; 5] {
        [
            &self.gc_name,
            &self.gc_address,
            &self.gc_city,
            &self.gc_state,
            &self.gc_zip,
        ]
    }

    pub fn any_owner_field_missing(&self) -> bool {
        self.owner_fields().iter().any(|f| f.is_none())
    }

    pub fn any_gc_field_missing(&self) -> bool {
        self.gc_fields().iter().any(|f| f.is_none())
    }
}

/// One merged, deduplicated job contact: one row per (project, company) pair
/// with a canonical project number and derived job ID.
#[derive(Debug, Clone, PartialEq)]
pub struct JobContact {
    pub project_number: String,
    pub company: Company,
    pub job_id: String,
    pub fields: ContactFields,
}

/// A job contact with its responsible leader attached.
///
/// The leader is a plain `String` by construction: unassigned projects never
/// survive leader enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedContact {
    pub contact: JobContact,
    pub leader: String,
}

/// A job contact with leader and leader e-mail attached.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedContact {
    pub contact: JobContact,
    pub leader: String,
    pub leader_email: String,
}

/// Final classified record, projected onto the notification column set.
///
/// Serializes to/from the missing-info CSV layout (the Job ID column is not
/// part of that layout; the project number carries the identity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingInfoRecord {
    #[serde(rename = "Company")]
    pub company: Company,
    #[serde(rename = "Project Number")]
    pub project_number: String,
    #[serde(rename = "Project Nickname")]
    pub project_nickname: Option<String>,
    #[serde(rename = "Customer Name")]
    pub customer_name: Option<String>,
    #[serde(rename = "Customer Phone")]
    pub customer_phone: Option<String>,
    #[serde(rename = "Customer Address")]
    pub customer_address: Option<String>,
    #[serde(rename = "Customer City")]
    pub customer_city: Option<String>,
    #[serde(rename = "Customer State")]
    pub customer_state: Option<String>,
    #[serde(rename = "Customer Zip")]
    pub customer_zip: Option<String>,
    #[serde(rename = "Customer Role")]
    pub customer_role: Option<String>,
    #[serde(rename = "GC Name")]
    pub gc_name: Option<String>,
    #[serde(rename = "GC Address")]
    pub gc_address: Option<String>,
    #[serde(rename = "GC City")]
    pub gc_city: Option<String>,
    #[serde(rename = "GC State")]
    pub gc_state: Option<String>,
    #[serde(rename = "GC Zip")]
    pub gc_zip: Option<String>,
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
    #[serde(rename = "Leader")]
    pub leader: String,
    #[serde(rename = "Leader Email")]
    pub leader_email: String,
    #[serde(rename = "URL")]
    pub url: Option<String>,
}

impl MissingInfoRecord {
    pub fn from_enriched(record: EnrichedContact, url: Option<String>) -> Self {
        let EnrichedContact {
            contact,
            leader,
            leader_email,
        } = record;
        let f = contact.fields;
        Self {
            company: contact.company,
            project_number: contact.project_number,
            project_nickname: f.project_nickname,
            customer_name: f.customer_name,
            customer_phone: f.customer_phone,
            customer_address: f.customer_address,
            customer_city: f.customer_city,
            customer_state: f.customer_state,
            customer_zip: f.customer_zip,
            customer_role: f.customer_role,
            gc_name: f.gc_name,
            gc_address: f.gc_address,
            gc_city: f.gc_city,
            gc_state: f.gc_state,
            gc_zip: f.gc_zip,
            owner_name: f.owner_name,
            owner_address: f.owner_address,
            owner_city: f.owner_city,
            owner_state: f.owner_state,
            owner_zip: f.owner_zip,
            leader,
            leader_email,
            url,
        }
    }
}

/// Per-leader batch of missing-info records, ready for notification.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderBatch {
    pub leader: String,
    pub leader_email: String,
    pub records: Vec<MissingInfoRecord>,
}
