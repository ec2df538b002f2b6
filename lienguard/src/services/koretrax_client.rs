//! Koretrax share-link client
//!
//! Resolves a project number to its share-link URL on the project-tracking
//! site. The site tolerates polite automation only, so requests are spaced
//! by a fixed minimum interval and time out after ten seconds.

use crate::services::url_cache::ResolveUrl;
use lienguard_common::{Error, Result};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const USER_AGENT: &str = "lienguard/0.1.0";
const POLITENESS_MS: u64 = 500;

/// Spaces requests by a fixed minimum interval.
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

#[derive(Debug, Deserialize)]
struct ShareLinkResponse {
    url: String,
}

/// HTTP client for the project-tracking site's share-link endpoint.
pub struct KoretraxClient {
    http_client: reqwest::Client,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl KoretraxClient {
    pub fn new(base_url: String) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url,
            rate_limiter: RateLimiter::new(POLITENESS_MS),
        })
    }
}

impl ResolveUrl for KoretraxClient {
    async fn resolve(&self, project_number: &str) -> Result<Option<String>> {
        self.rate_limiter.wait().await;

        let url = format!("{}/api/projects/{}/share-link", self.base_url, project_number);
        tracing::debug!(project_number = %project_number, url = %url, "Querying share-link endpoint");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("share-link request failed: {e}")))?;

        let status = response.status();

        // Unknown project: not an error, the URL just stays unresolved.
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            return Err(Error::Transport(format!(
                "share-link endpoint returned {status} for {project_number}"
            )));
        }

        let link: ShareLinkResponse = response
            .json()
            .await
            .map_err(|e| Error::Transport(format!("malformed share-link response: {e}")))?;

        Ok(Some(link.url))
    }
}
