//! Data model for the reconciliation engine
//!
//! All entities are immutable transformations of input tables; the only
//! persisted mutable entity is the URL cache.

pub mod company;
pub mod contact;
pub mod ledger;

pub use company::Company;
pub use contact::{
    AssignedContact, ContactFields, ContactRow, EnrichedContact, JobContact, LeaderBatch,
    MissingInfoRecord,
};
pub use ledger::{
    ArInvoiceLine, DirectoryEntry, InvoiceLedger, ProjectRegistry, UrlCacheEntry,
};

/// True when both values are present and equal.
///
/// Two absent values are NOT equal: a job with neither customer nor owner
/// named must stay a missing-info candidate.
pub fn both_present_eq(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}
