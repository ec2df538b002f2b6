//! Reconciliation stages and external collaborators

pub mod contact_merger;
pub mod identifier;
pub mod invoice_filter;
pub mod koretrax_client;
pub mod leader_enricher;
pub mod leader_grouper;
pub mod lien_sheet;
pub mod missing_info;
pub mod notifier;
pub mod pipeline;
pub mod url_cache;

pub use koretrax_client::KoretraxClient;
pub use notifier::{Notify, WebhookNotifier};
pub use pipeline::{PipelineInputs, ReconcileOutcome, ReconcilePipeline, RunSummary};
pub use url_cache::{ResolveUrl, UrlCacheReconciler};
