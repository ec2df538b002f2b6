//! Project-leader and directory enrichment
//!
//! Two joins run back to back: the project registry assigns a leader name to
//! each contact, and the personnel directory turns that name into an email
//! address. Missing leaders are expected (jobs without an assigned leader are
//! silently dropped); a leader with no directory entry is an operator problem
//! and fails the run.

use crate::models::{AssignedContact, DirectoryEntry, EnrichedContact, JobContact, ProjectRegistry};
use lienguard_common::{Error, Result};
use std::collections::HashMap;

/// Join contacts to the project registry by project number.
///
/// Contacts whose project is unregistered, or registered without an assigned
/// leader, are dropped.
pub fn assign_leaders(contacts: Vec<JobContact>, registry: &ProjectRegistry) -> Vec<AssignedContact> {
    let before = contacts.len();
    let assigned: Vec<AssignedContact> = contacts
        .into_iter()
        .filter_map(|contact| {
            match registry.leader_of(&contact.project_number) {
                Some(leader) => Some(AssignedContact {
                    leader: leader.to_string(),
                    contact,
                }),
                None => {
                    tracing::debug!(
                        project_number = %contact.project_number,
                        "Dropping contact with no assigned project leader"
                    );
                    None
                }
            }
        })
        .collect();

    if assigned.len() < before {
        tracing::info!(
            dropped = before - assigned.len(),
            remaining = assigned.len(),
            "Dropped contacts without an assigned project leader"
        );
    }

    assigned
}

/// Attach a leader email to every surviving contact.
///
/// Directory lookup is by full name (`first + " " + surname`). Every leader
/// must resolve; any miss fails the whole batch, naming the unresolved
/// leaders so the directory can be fixed before a re-run.
pub fn attach_leader_emails(
    contacts: Vec<AssignedContact>,
    directory: &[DirectoryEntry],
) -> Result<Vec<EnrichedContact>> {
    let emails: HashMap<String, &str> = directory
        .iter()
        .map(|entry| (entry.full_name(), entry.email.as_str()))
        .collect();

    let mut unresolved: Vec<String> = Vec::new();
    let mut enriched = Vec::with_capacity(contacts.len());
    for assigned in contacts {
        match emails.get(assigned.leader.as_str()) {
            Some(email) => enriched.push(EnrichedContact {
                leader_email: (*email).to_string(),
                leader: assigned.leader,
                contact: assigned.contact,
            }),
            None => {
                if !unresolved.contains(&assigned.leader) {
                    unresolved.push(assigned.leader.clone());
                }
            }
        }
    }

    if !unresolved.is_empty() {
        return Err(Error::DataIntegrity(format!(
            "{} leader(s) missing from the personnel directory: {}",
            unresolved.len(),
            unresolved.join(", ")
        )));
    }

    Ok(enriched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Company, ContactFields};
    use std::collections::HashMap;

    fn contact(project_number: &str) -> JobContact {
        JobContact {
            project_number: project_number.to_string(),
            company: Company::Hts,
            job_id: project_number.chars().take(8).collect(),
            fields: ContactFields::default(),
        }
    }

    fn registry(pairs: &[(&str, Option<&str>)]) -> ProjectRegistry {
        let map: HashMap<String, Option<String>> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect();
        ProjectRegistry::new(map)
    }

    fn entry(first: &str, surname: &str, email: &str) -> DirectoryEntry {
        DirectoryEntry {
            first_name: first.to_string(),
            surname: surname.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn unassigned_and_unregistered_contacts_are_dropped() {
        let reg = registry(&[
            ("20200001-HTS-1", Some("Jane Doe")),
            ("20200002-HTS-1", None),
        ]);
        let assigned = assign_leaders(
            vec![
                contact("20200001-HTS-1"),
                contact("20200002-HTS-1"),
                contact("20200003-HTS-1"),
            ],
            &reg,
        );
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].leader, "Jane Doe");
    }

    #[test]
    fn leader_emails_resolve_by_full_name() {
        let directory = vec![entry("Jane", "Doe", "jane.doe@example.com")];
        let assigned = vec![AssignedContact {
            contact: contact("20200001-HTS-1"),
            leader: "Jane Doe".to_string(),
        }];
        let enriched = attach_leader_emails(assigned, &directory).unwrap();
        assert_eq!(enriched.len(), 1);
        assert_eq!(enriched[0].leader_email, "jane.doe@example.com");
    }

    #[test]
    fn unresolved_leader_fails_with_names() {
        let directory = vec![entry("Jane", "Doe", "jane.doe@example.com")];
        let assigned = vec![
            AssignedContact {
                contact: contact("20200001-HTS-1"),
                leader: "John Roe".to_string(),
            },
            AssignedContact {
                contact: contact("20200002-HTS-1"),
                leader: "John Roe".to_string(),
            },
        ];
        let err = attach_leader_emails(assigned, &directory).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("1 leader(s)"));
        assert!(msg.contains("John Roe"));
    }
}
