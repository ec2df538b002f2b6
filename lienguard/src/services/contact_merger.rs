//! Contact table merging and deduplication
//!
//! Unions the per-company contact exports into one table keyed by canonical
//! project number. Sub-decimal variants of the same project always duplicate
//! their base record, so the first occurrence in concatenation order wins.

use crate::models::{Company, ContactFields, ContactRow, JobContact};
use crate::services::identifier;
use lienguard_common::{Error, Result};
use std::collections::HashSet;

/// Merge per-company contact tables into one deduplicated record set.
///
/// Tables are concatenated in the caller's iteration order; callers wanting
/// determinism across runs must pass companies in a fixed order. Every row is
/// stamped with its company tag, its project number canonicalized, its job ID
/// derived, and blank-ish values coerced to absent. Deduplication keeps the
/// first occurrence per canonical project number.
///
/// Post-condition: output project numbers are pairwise unique.
pub fn merge_contacts(tables: Vec<(Company, Vec<ContactRow>)>) -> Result<Vec<JobContact>> {
    let mut merged: Vec<JobContact> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (company, rows) in tables {
        let table_len = rows.len();
        let mut kept = 0usize;

        for row in rows {
            let project_number = identifier::canonical_project_number(&row.project_number);
            if !seen.insert(project_number.clone()) {
                continue;
            }
            let job_id = identifier::job_id(&project_number).to_string();
            merged.push(JobContact {
                project_number,
                company,
                job_id,
                fields: ContactFields::from_row(row),
            });
            kept += 1;
        }

        tracing::debug!(
            company = %company,
            rows = table_len,
            kept,
            "Merged contact table"
        );
    }

    // Should be unreachable given the seen-set, but a duplicate surviving
    // here would corrupt every downstream join.
    let mut check: HashSet<&str> = HashSet::with_capacity(merged.len());
    for contact in &merged {
        if !check.insert(&contact.project_number) {
            return Err(Error::Internal(format!(
                "Duplicate project number '{}' survived deduplication",
                contact.project_number
            )));
        }
    }

    Ok(merged)
}
