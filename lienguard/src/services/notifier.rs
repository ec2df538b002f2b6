//! Leader notification
//!
//! The engine hands each leader batch to a [`Notify`] implementation and
//! leaves delivery mechanics to it. The shipped implementation POSTs the
//! batch as JSON to a configured webhook endpoint.
//!
//! Routing is deliberately conservative: unless a run is explicitly flagged
//! live, every notification goes to the configured test recipient instead of
//! the leader's real address.

use crate::models::LeaderBatch;
use chrono::{DateTime, Utc};
use lienguard_common::{Error, Result};
use serde::Serialize;
use uuid::Uuid;

/// Delivers one leader batch. No retry; callers aggregate failures.
pub trait Notify {
    async fn notify(&self, batch: &LeaderBatch) -> Result<()>;
}

/// JSON payload POSTed per leader.
#[derive(Debug, Serialize)]
struct NotificationPayload<'a> {
    run_id: Uuid,
    sent_at: DateTime<Utc>,
    leader: &'a str,
    recipient: &'a str,
    second_notice: bool,
    records: &'a [crate::models::MissingInfoRecord],
}

pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: String,
    run_id: Uuid,
    /// Real leader addresses are used only when true.
    go_live: bool,
    test_recipient: Option<String>,
    second_notice: bool,
}

impl WebhookNotifier {
    pub fn new(
        endpoint: String,
        run_id: Uuid,
        go_live: bool,
        test_recipient: Option<String>,
        second_notice: bool,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint,
            run_id,
            go_live,
            test_recipient,
            second_notice,
        })
    }

    /// The address a batch actually goes to under the current routing mode.
    fn recipient_for<'a>(&'a self, batch: &'a LeaderBatch) -> Result<&'a str> {
        if self.go_live {
            Ok(batch.leader_email.as_str())
        } else {
            self.test_recipient.as_deref().ok_or_else(|| {
                Error::Config("no test recipient configured for a non-live run".to_string())
            })
        }
    }
}

impl Notify for WebhookNotifier {
    async fn notify(&self, batch: &LeaderBatch) -> Result<()> {
        let recipient = self.recipient_for(batch)?;
        let payload = NotificationPayload {
            run_id: self.run_id,
            sent_at: Utc::now(),
            leader: &batch.leader,
            recipient,
            second_notice: self.second_notice,
            records: &batch.records,
        };

        tracing::debug!(
            leader = %batch.leader,
            recipient = %recipient,
            live = self.go_live,
            "Posting leader notification"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("notification POST failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "notification endpoint returned {} for leader {}",
                response.status(),
                batch.leader
            )));
        }
        Ok(())
    }
}
