//! Project identifier normalization
//!
//! A project identifier is a base 8-character job ID, optionally suffixed
//! with `-<COMPANY>-<n>` and an optional sub-decimal revision (`.1`). The
//! sub-decimal variants always duplicate their base record, so they collapse
//! to the canonical form before deduplication.

use lienguard_common::{Error, Result};

/// Required job ID length for job-numbered entries.
pub const JOB_ID_LEN: usize = 8;

/// Canonicalize a raw project number.
///
/// An identifier whose second-to-last character is a literal period carries a
/// sub-decimal revision suffix; everything from the last period onward is
/// stripped. Detection is deliberately single-digit: `"12345678.12"` does not
/// match and passes through untouched (multi-digit suffixes are undocumented
/// in the business data and left as-is).
pub fn canonical_project_number(raw: &str) -> String {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 && bytes[bytes.len() - 2] == b'.' {
        if let Some(dot) = raw.rfind('.') {
            return raw[..dot].to_string();
        }
    }
    raw.to_string()
}

/// Derive the job ID: the substring before the first hyphen.
///
/// Hyphen-free identifiers are their own job ID.
pub fn job_id(project_number: &str) -> &str {
    project_number
        .split('-')
        .next()
        .unwrap_or(project_number)
}

/// True for ledger placeholder entries that are not job-numbered: hyphen-free
/// identifiers beginning with `P` or `I`.
pub fn is_placeholder(identifier: &str) -> bool {
    !identifier.contains('-') && (identifier.starts_with('P') || identifier.starts_with('I'))
}

/// Enforce the 8-character job ID rule on a ledger identifier.
///
/// Callers exclude placeholder entries first; anything left with a short or
/// long job ID is corrupt ledger data, fatal for the batch.
pub fn check_job_id_length(identifier: &str) -> Result<()> {
    let id = job_id(identifier);
    if id.len() != JOB_ID_LEN {
        return Err(Error::DataIntegrity(format!(
            "Job ID '{}' derived from ledger entry '{}' is {} characters, expected {}",
            id,
            identifier,
            id.len(),
            JOB_ID_LEN
        )));
    }
    Ok(())
}
