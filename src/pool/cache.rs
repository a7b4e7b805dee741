//! Cached address pool with fail-soft refresh.
//!
//! # Responsibilities
//! - Hold the last good address list behind a reader/writer lock
//! - Fetch and filter the external list on demand (bounded 10s timeout)
//! - Never let a failed or empty fetch clear a populated pool
//! - Report advisory staleness (1 hour) to the snapshot path
//!
//! # Design Decisions
//! - The network fetch runs with no lock held; the write lock is taken only
//!   to install the result, so readers never block on I/O
//! - A transport or non-2xx failure leaves the pool and its fetch stamp
//!   untouched, so the next snapshot retries immediately
//! - A successful fetch stamps the time even when the filtered result is
//!   empty and discarded (stale-but-valid beats empty)

use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use url::Url;

use crate::pool::filter::filter_addresses;

/// Address installed when the source is unusable and the pool is empty.
pub const LOOPBACK_PLACEHOLDER: &str = "127.0.0.1";

/// Pool age beyond which the snapshot path triggers a refresh.
pub const STALE_AFTER: Duration = Duration::from_secs(60 * 60);

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Error fetching the address source. Always fail-soft: logged by
/// [`AddressPool::refresh`], never propagated to a request.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("source returned {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Default)]
struct PoolState {
    addresses: Vec<String>,
    fetched_at: Option<Instant>,
}

/// Lock-guarded cache of candidate server addresses.
pub struct AddressPool {
    client: reqwest::Client,
    inner: RwLock<PoolState>,
}

impl AddressPool {
    /// Create an empty pool. Call [`refresh`](Self::refresh) once at
    /// startup so downstream code never observes it empty.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            inner: RwLock::new(PoolState::default()),
        }
    }

    /// Read-locked copy of the cached addresses, in fetch order.
    pub async fn addresses(&self) -> Vec<String> {
        self.inner.read().await.addresses.clone()
    }

    /// True when the pool has never been stamped or its last fetch is more
    /// than [`STALE_AFTER`] old. Advisory: does not trigger a refresh.
    pub async fn is_stale(&self) -> bool {
        match self.inner.read().await.fetched_at {
            Some(fetched_at) => fetched_at.elapsed() > STALE_AFTER,
            None => true,
        }
    }

    /// Fetch, filter, and install the address list.
    ///
    /// Outcomes:
    /// - unusable source URL: install the loopback placeholder and stamp
    /// - fetch failure: keep the pool as-is (seed loopback only if empty)
    /// - empty filtered result: keep the pool as-is, stamp
    /// - non-empty filtered result: replace the pool, stamp
    pub async fn refresh(&self, source_url: &str, prefix_filter: &str) {
        if !is_http_url(source_url) {
            tracing::info!(source_url, "Address source unusable, using loopback placeholder");
            let mut state = self.inner.write().await;
            state.addresses = vec![LOOPBACK_PLACEHOLDER.to_string()];
            state.fetched_at = Some(Instant::now());
            return;
        }

        // No lock held across the network call.
        let body = match self.fetch(source_url).await {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(source_url, %error, "Address fetch failed, keeping cached pool");
                let mut state = self.inner.write().await;
                if state.addresses.is_empty() {
                    state.addresses = vec![LOOPBACK_PLACEHOLDER.to_string()];
                }
                return;
            }
        };

        let filtered = filter_addresses(&body, prefix_filter);
        let mut state = self.inner.write().await;
        if filtered.is_empty() {
            tracing::info!(source_url, "Fetched list empty after filtering, keeping cached pool");
        } else {
            tracing::info!(
                source_url,
                count = filtered.len(),
                prefix_filter,
                "Address pool refreshed"
            );
            state.addresses = filtered;
        }
        state.fetched_at = Some(Instant::now());
    }

    async fn fetch(&self, source_url: &str) -> Result<String, FetchError> {
        let response = self.client.get(source_url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(response.text().await?)
    }

    #[cfg(test)]
    pub(crate) async fn seed(&self, addresses: Vec<String>, fetched_at: Option<Instant>) {
        let mut state = self.inner.write().await;
        state.addresses = addresses;
        state.fetched_at = fetched_at;
    }
}

fn is_http_url(raw: &str) -> bool {
    matches!(Url::parse(raw), Ok(url) if url.scheme() == "http" || url.scheme() == "https")
}
