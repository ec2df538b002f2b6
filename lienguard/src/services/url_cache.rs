//! URL cache reconciliation
//!
//! Records carry a reference URL for the project they describe. Resolved
//! URLs are cached across runs in a small CSV so the resolver is only asked
//! about projects it has never seen. Reconciliation joins the record set
//! against the cache, resolves the gaps, and re-joins so newly resolved URLs
//! land in the same run's output.
//!
//! The expensive part is the resolver round trips, so partial progress is
//! never thrown away: when resolution aborts mid-batch the successes gathered
//! so far are already in the cache vector and the caller persists them before
//! propagating the error.

use crate::models::{MissingInfoRecord, UrlCacheEntry};
use lienguard_common::Result;
use std::collections::HashMap;

/// Resolves a project number to a reference URL.
///
/// `Ok(None)` means the resolver answered but has no URL for this project
/// (non-fatal); `Err` means the resolver itself is unreachable or broken and
/// the batch should stop.
pub trait ResolveUrl {
    async fn resolve(&self, project_number: &str) -> Result<Option<String>>;
}

impl<R: ResolveUrl> ResolveUrl for &R {
    async fn resolve(&self, project_number: &str) -> Result<Option<String>> {
        (*self).resolve(project_number).await
    }
}

/// Left-join records to the cache by project number. Records without a cache
/// entry keep `url = None`.
pub fn attach_urls(records: Vec<MissingInfoRecord>, cache: &[UrlCacheEntry]) -> Vec<MissingInfoRecord> {
    let by_project: HashMap<&str, &str> = cache
        .iter()
        .map(|e| (e.project_number.as_str(), e.url.as_str()))
        .collect();

    records
        .into_iter()
        .map(|mut record| {
            record.url = by_project
                .get(record.project_number.as_str())
                .map(|url| (*url).to_string());
            record
        })
        .collect()
}

/// Project numbers still lacking a URL, deduplicated, in record order.
pub fn unresolved_projects(records: &[MissingInfoRecord]) -> Vec<String> {
    let mut seen = Vec::new();
    for record in records {
        if record.url.is_none() && !seen.contains(&record.project_number) {
            seen.push(record.project_number.clone());
        }
    }
    seen
}

pub struct UrlCacheReconciler<R> {
    resolver: R,
}

impl<R: ResolveUrl> UrlCacheReconciler<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Resolve each project and append successes to `cache`.
    ///
    /// Per-project misses leave no entry and are non-fatal. A resolver error
    /// stops the batch; entries appended before the error stay in `cache` so
    /// the caller can persist them before bailing out.
    pub async fn resolve_into(&self, projects: &[String], cache: &mut Vec<UrlCacheEntry>) -> Result<usize> {
        let mut resolved = 0usize;
        for project_number in projects {
            match self.resolver.resolve(project_number).await? {
                Some(url) => {
                    tracing::debug!(project_number = %project_number, url = %url, "Resolved project URL");
                    cache.push(UrlCacheEntry {
                        project_number: project_number.clone(),
                        url,
                    });
                    resolved += 1;
                }
                None => {
                    tracing::warn!(project_number = %project_number, "No URL found for project");
                }
            }
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Company;
    use lienguard_common::Error;

    fn record(project_number: &str) -> MissingInfoRecord {
        MissingInfoRecord {
            company: Company::Hts,
            project_number: project_number.to_string(),
            project_nickname: None,
            customer_name: None,
            customer_phone: None,
            customer_address: None,
            customer_city: None,
            customer_state: None,
            customer_zip: None,
            customer_role: None,
            gc_name: None,
            gc_address: None,
            gc_city: None,
            gc_state: None,
            gc_zip: None,
            owner_name: None,
            owner_address: None,
            owner_city: None,
            owner_state: None,
            owner_zip: None,
            leader: "Jane Doe".to_string(),
            leader_email: "jane.doe@example.com".to_string(),
            url: None,
        }
    }

    fn entry(project_number: &str, url: &str) -> UrlCacheEntry {
        UrlCacheEntry {
            project_number: project_number.to_string(),
            url: url.to_string(),
        }
    }

    /// Resolver script: Some → URL, None → miss; exhausting the script is a
    /// transport failure.
    struct ScriptedResolver {
        script: std::sync::Mutex<Vec<Option<String>>>,
    }

    impl ScriptedResolver {
        fn new(script: Vec<Option<&str>>) -> Self {
            Self {
                script: std::sync::Mutex::new(
                    script.into_iter().rev().map(|s| s.map(str::to_string)).collect(),
                ),
            }
        }
    }

    impl ResolveUrl for ScriptedResolver {
        async fn resolve(&self, _project_number: &str) -> Result<Option<String>> {
            let mut script = self.script.lock().unwrap();
            script
                .pop()
                .map(Ok)
                .unwrap_or_else(|| Err(Error::Transport("resolver unreachable".to_string())))
        }
    }

    #[test]
    fn attach_joins_by_project_number() {
        let cache = vec![entry("20200001-HTS-1", "https://x/jobs/1")];
        let records = attach_urls(
            vec![record("20200001-HTS-1"), record("20200002-HTS-1")],
            &cache,
        );
        assert_eq!(records[0].url.as_deref(), Some("https://x/jobs/1"));
        assert_eq!(records[1].url, None);
    }

    #[test]
    fn unresolved_projects_deduplicates_in_order() {
        let mut a = record("20200002-HTS-1");
        a.url = None;
        let records = vec![a.clone(), record("20200001-HTS-1"), a];
        let unresolved = unresolved_projects(&records);
        assert_eq!(unresolved, vec!["20200002-HTS-1", "20200001-HTS-1"]);
    }

    #[tokio::test]
    async fn misses_are_nonfatal_and_skipped() {
        let reconciler = UrlCacheReconciler::new(ScriptedResolver::new(vec![
            Some("https://x/jobs/1"),
            None,
        ]));
        let mut cache = Vec::new();
        let resolved = reconciler
            .resolve_into(
                &["20200001-HTS-1".to_string(), "20200002-HTS-1".to_string()],
                &mut cache,
            )
            .await
            .unwrap();
        assert_eq!(resolved, 1);
        assert_eq!(cache, vec![entry("20200001-HTS-1", "https://x/jobs/1")]);
    }

    #[tokio::test]
    async fn abort_keeps_partial_progress_in_cache() {
        let reconciler =
            UrlCacheReconciler::new(ScriptedResolver::new(vec![Some("https://x/jobs/1")]));
        let mut cache = Vec::new();
        let err = reconciler
            .resolve_into(
                &["20200001-HTS-1".to_string(), "20200002-HTS-1".to_string()],
                &mut cache,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(cache, vec![entry("20200001-HTS-1", "https://x/jobs/1")]);
    }
}
