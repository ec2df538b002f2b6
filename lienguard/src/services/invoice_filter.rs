//! Invoice ledger filtering
//!
//! Restricts the merged contact table to projects that actually appear in the
//! supplied invoice ledger. The two ledger schemas carry their keys
//! differently: accounts-receivable exports (variant A) key by `Project ID`
//! and still contain `P`/`I` placeholder entries; lien exports (variant B)
//! key by `order_no` and arrive pre-filtered.

use crate::models::{Company, InvoiceLedger, JobContact};
use crate::services::identifier;
use lienguard_common::Result;
use std::collections::HashSet;

/// Keep only contacts whose project number appears in the ledger.
///
/// Variant A entries beginning with `P` or `I` and containing no hyphen are
/// excluded before matching; every remaining entry must carry an 8-character
/// job ID (fatal otherwise). Variant B order numbers restrict directly.
///
/// Idempotent: filtering the output again with the same ledger is a no-op.
pub fn filter_for_ledger(
    contacts: Vec<JobContact>,
    ledger: &InvoiceLedger,
) -> Result<Vec<JobContact>> {
    let keys = ledger_key_set(ledger)?;

    let before = contacts.len();
    let filtered: Vec<JobContact> = contacts
        .into_iter()
        .filter(|c| keys.contains(c.project_number.as_str()))
        .collect();

    tracing::debug!(
        ledger_entries = keys.len(),
        contacts_in = before,
        contacts_out = filtered.len(),
        "Filtered contacts against invoice ledger"
    );

    Ok(filtered)
}

/// The restricting key set for a ledger.
pub fn ledger_key_set(ledger: &InvoiceLedger) -> Result<HashSet<&str>> {
    match ledger {
        InvoiceLedger::AccountsReceivable(lines) => {
            let mut keys = HashSet::with_capacity(lines.len());
            for line in lines {
                if identifier::is_placeholder(&line.project_id) {
                    continue;
                }
                identifier::check_job_id_length(&line.project_id)?;
                keys.insert(line.project_id.as_str());
            }
            Ok(keys)
        }
        InvoiceLedger::LienExports(orders) => {
            Ok(orders.iter().map(String::as_str).collect())
        }
    }
}

/// Advisory cross-check: a lien-exports ledger supplied together with
/// companies that conventionally reconcile against accounts-receivable
/// exports usually means the operator picked the wrong file. The caller
/// decides whether to proceed; this is not a correctness requirement.
pub fn is_schema_mismatch(ledger: &InvoiceLedger, companies: &[Company]) -> bool {
    matches!(ledger, InvoiceLedger::LienExports(_))
        && companies.iter().any(Company::uses_ar_ledger)
}
