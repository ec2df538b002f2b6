//! Missing-information classification
//!
//! Decides which enriched contacts need a leader follow-up. A record is a
//! candidate when any Owner- or GC-prefixed field is absent; two refinements
//! then cut candidates whose counterparty roles collapse into the customer:
//!
//! 1. When the customer is the owner, owner details are already on file with
//!    the customer record, so the contact is excluded outright.
//! 2. When the customer is the general contractor, GC gaps are equally moot;
//!    those records survive only if the Owner side is also incomplete.
//!
//! Name comparisons require both sides present: two absent names never match.

use crate::models::{both_present_eq, EnrichedContact};
use lienguard_common::{Error, Result};

/// Classify enriched contacts into the set needing missing-info follow-up.
pub fn classify(contacts: Vec<EnrichedContact>) -> Result<Vec<EnrichedContact>> {
    let total = contacts.len();

    let candidates: Vec<EnrichedContact> = contacts
        .into_iter()
        .filter(|c| c.contact.fields.any_owner_field_missing() || c.contact.fields.any_gc_field_missing())
        .collect();

    // Refinement 1: customer is the owner.
    let after_owner: Vec<EnrichedContact> = candidates
        .into_iter()
        .filter(|c| !both_present_eq(&c.contact.fields.customer_name, &c.contact.fields.owner_name))
        .collect();

    // Refinement 2: customer is the GC; keep only if the Owner side has gaps.
    let mut classified: Vec<EnrichedContact> = Vec::with_capacity(after_owner.len());
    for record in after_owner {
        let gc_is_customer =
            both_present_eq(&record.contact.fields.customer_name, &record.contact.fields.gc_name);
        if !gc_is_customer || record.contact.fields.any_owner_field_missing() {
            classified.push(record);
        }
    }

    verify_classification(&classified)?;

    tracing::info!(
        contacts_in = total,
        classified = classified.len(),
        "Classified contacts needing missing-information follow-up"
    );

    Ok(classified)
}

/// Re-check the classifier's own post-conditions over the output set.
fn verify_classification(classified: &[EnrichedContact]) -> Result<()> {
    for record in classified {
        let fields = &record.contact.fields;
        if !fields.any_owner_field_missing() && !fields.any_gc_field_missing() {
            return Err(Error::Internal(format!(
                "classified record {} has no missing Owner or GC field",
                record.contact.project_number
            )));
        }
        if both_present_eq(&fields.customer_name, &fields.owner_name) {
            return Err(Error::Internal(format!(
                "classified record {} has customer equal to owner",
                record.contact.project_number
            )));
        }
        if both_present_eq(&fields.customer_name, &fields.gc_name)
            && !fields.any_owner_field_missing()
        {
            return Err(Error::Internal(format!(
                "classified record {} has customer equal to GC with complete Owner fields",
                record.contact.project_number
            )));
        }
    }
    Ok(())
}
