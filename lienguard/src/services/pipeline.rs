//! Reconciliation pipeline
//!
//! Threads the stage outputs from raw contact tables through to the final
//! missing-info record set. There is no shared session state; each stage
//! consumes the previous stage's output and the pipeline logs every phase
//! under one run id.

use crate::models::{
    Company, ContactRow, DirectoryEntry, InvoiceLedger, MissingInfoRecord, ProjectRegistry,
};
use crate::services::{
    contact_merger, invoice_filter, leader_enricher, missing_info, url_cache,
    url_cache::{ResolveUrl, UrlCacheReconciler},
};
use crate::store::UrlCacheStore;
use lienguard_common::Result;
use std::collections::HashMap;
use uuid::Uuid;

/// Everything a reconcile run consumes.
pub struct PipelineInputs {
    pub tables: Vec<(Company, Vec<ContactRow>)>,
    pub ledger: InvoiceLedger,
    pub registry: ProjectRegistry,
    pub directory: Vec<DirectoryEntry>,
}

/// What a reconcile run produced.
#[derive(Debug)]
pub struct ReconcileOutcome {
    pub contacts_considered: usize,
    pub missing_info: Vec<MissingInfoRecord>,
    pub summary: RunSummary,
}

/// Operator-facing run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub considered: usize,
    pub missing: usize,
    /// Leader name and record count, largest first, name-ordered on ties.
    pub per_leader: Vec<(String, usize)>,
}

impl RunSummary {
    fn new(considered: usize, records: &[MissingInfoRecord]) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.leader.as_str()).or_default() += 1;
        }
        let mut per_leader: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(leader, count)| (leader.to_string(), count))
            .collect();
        per_leader.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            considered,
            missing: records.len(),
            per_leader,
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} of {} projects missing information",
            self.missing, self.considered
        )?;
        for (leader, count) in &self.per_leader {
            writeln!(f, "  {leader}: {count}")?;
        }
        Ok(())
    }
}

/// One reconcile run.
///
/// `confirm` is asked before any resolver round trips happen; answering
/// false leaves the affected records with no URL rather than failing the run.
pub struct ReconcilePipeline<R, C> {
    run_id: Uuid,
    resolver: R,
    cache_store: UrlCacheStore,
    confirm: C,
}

impl<R, C> ReconcilePipeline<R, C>
where
    R: ResolveUrl,
    C: Fn(&str) -> bool,
{
    pub fn new(resolver: R, cache_store: UrlCacheStore, confirm: C) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            resolver,
            cache_store,
            confirm,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub async fn run(&self, inputs: PipelineInputs) -> Result<ReconcileOutcome> {
        let run_id = self.run_id;

        let merged = contact_merger::merge_contacts(inputs.tables)?;
        tracing::info!(%run_id, contacts = merged.len(), "Merged contact tables");

        let filtered = invoice_filter::filter_for_ledger(merged, &inputs.ledger)?;
        tracing::info!(%run_id, contacts = filtered.len(), "Restricted to invoiced projects");

        let assigned = leader_enricher::assign_leaders(filtered, &inputs.registry);
        let enriched = leader_enricher::attach_leader_emails(assigned, &inputs.directory)?;
        tracing::info!(%run_id, contacts = enriched.len(), "Enriched with leader emails");

        let considered = enriched.len();
        let classified = missing_info::classify(enriched)?;

        let records: Vec<MissingInfoRecord> = classified
            .into_iter()
            .map(|record| MissingInfoRecord::from_enriched(record, None))
            .collect();

        let records = self.reconcile_urls(records).await?;

        let summary = RunSummary::new(considered, &records);
        tracing::info!(
            %run_id,
            considered = summary.considered,
            missing = summary.missing,
            "Reconcile run complete"
        );

        Ok(ReconcileOutcome {
            contacts_considered: considered,
            missing_info: records,
            summary,
        })
    }

    /// Join records to the URL cache, resolve the gaps if the caller agrees,
    /// and re-join so fresh URLs land in this run's output.
    async fn reconcile_urls(
        &self,
        records: Vec<MissingInfoRecord>,
    ) -> Result<Vec<MissingInfoRecord>> {
        let mut cache = self.cache_store.load()?;
        let records = url_cache::attach_urls(records, &cache);

        let unresolved = url_cache::unresolved_projects(&records);
        if unresolved.is_empty() {
            return Ok(records);
        }

        tracing::info!(run_id = %self.run_id, unresolved = unresolved.len(), "Projects lacking a cached URL");
        let prompt = format!(
            "Resolve URLs for {} project(s) not in the cache?",
            unresolved.len()
        );
        if !(self.confirm)(&prompt) {
            tracing::warn!(run_id = %self.run_id, "URL resolution skipped by operator");
            return Ok(records);
        }

        let reconciler = UrlCacheReconciler::new(&self.resolver);
        let outcome = reconciler.resolve_into(&unresolved, &mut cache).await;

        // Whatever resolved before a failure is still worth keeping.
        self.cache_store.save(&cache)?;

        let resolved = outcome?;
        tracing::info!(run_id = %self.run_id, resolved, "Resolved and cached project URLs");

        Ok(url_cache::attach_urls(records, &cache))
    }
}
