//! Invoice ledger, project registry, personnel directory and URL cache types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One line of a variant-A (accounts-receivable) ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ArInvoiceLine {
    pub project_id: String,
    /// Project title column, when the export carries one (used by the lien
    /// sheet for placeholder rows).
    pub job_name: Option<String>,
}

/// An invoice ledger in one of its two incompatible schemas.
///
/// Variant detection happens at load time from the header row; the engine
/// never re-detects.
#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceLedger {
    /// Variant A: accounts-receivable export keyed by `Project ID`.
    AccountsReceivable(Vec<ArInvoiceLine>),
    /// Variant B: lien-exports file keyed by `order_no`.
    LienExports(Vec<String>),
}

impl InvoiceLedger {
    pub fn len(&self) -> usize {
        match self {
            InvoiceLedger::AccountsReceivable(lines) => lines.len(),
            InvoiceLedger::LienExports(orders) => orders.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Project registry keyed by project identifier.
#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    leaders: HashMap<String, Option<String>>,
}

impl ProjectRegistry {
    pub fn new(leaders: HashMap<String, Option<String>>) -> Self {
        Self { leaders }
    }

    /// Leader assigned to a project, if the project is registered and has one.
    pub fn leader_of(&self, project_id: &str) -> Option<&str> {
        self.leaders
            .get(project_id)
            .and_then(|leader| leader.as_deref())
    }

    pub fn len(&self) -> usize {
        self.leaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaders.is_empty()
    }
}

/// One personnel directory row.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEntry {
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Surname")]
    pub surname: String,
    #[serde(rename = "Email")]
    pub email: String,
}

impl DirectoryEntry {
    /// Lookup key: first name and surname joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
    }
}

/// One persisted URL cache line: a project number and its resolved reference
/// URL. The cache file holds exactly these two columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlCacheEntry {
    #[serde(rename = "Project Number")]
    pub project_number: String,
    #[serde(rename = "URL")]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_distinguishes_unknown_from_unassigned() {
        let mut leaders = HashMap::new();
        leaders.insert("20200001-HTS-1".to_string(), Some("Jane Doe".to_string()));
        leaders.insert("20200002-HTS-1".to_string(), None);
        let registry = ProjectRegistry::new(leaders);

        assert_eq!(registry.leader_of("20200001-HTS-1"), Some("Jane Doe"));
        assert_eq!(registry.leader_of("20200002-HTS-1"), None);
        assert_eq!(registry.leader_of("not-registered"), None);
    }

    #[test]
    fn directory_full_name_join() {
        let entry = DirectoryEntry {
            first_name: "Jane".to_string(),
            surname: "Doe".to_string(),
            email: "jane@x.com".to_string(),
        };
        assert_eq!(entry.full_name(), "Jane Doe");
    }
}
