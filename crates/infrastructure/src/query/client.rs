use async_trait::async_trait;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};
use votewatch_application::ports::{QueryCacheMaintenance, QueryClient, SecurityApi};
use votewatch_domain::{DomainError, QueryData, QueryKey, QueryKind};

use super::retry::RetryPolicy;

const INVALIDATION_CHANNEL_CAPACITY: usize = 64;

type FetchOutcome = Result<Arc<QueryData>, DomainError>;
type InflightSender = Arc<watch::Sender<Option<FetchOutcome>>>;
type InflightMap = DashMap<QueryKey, InflightSender, FxBuildHasher>;

struct CacheEntry {
    data: Arc<QueryData>,
    updated_at: Instant,
    last_access: Instant,
    stale: bool,
}

/// Removes the in-flight slot if the leader future is dropped before
/// publishing, so followers wake up and take over. Once the leader has
/// published, the slot may already belong to a newer leader and is left
/// alone.
struct InflightLeaderGuard {
    inflight: Arc<InflightMap>,
    key: QueryKey,
    published: bool,
}

impl Drop for InflightLeaderGuard {
    fn drop(&mut self) {
        if self.published {
            return;
        }
        if let Some((_, tx)) = self.inflight.remove(&self.key) {
            let _ = tx.send(None);
        }
    }
}

/// Keyed result cache over a [`SecurityApi`].
///
/// At most one request per key is on the wire at any time; callers arriving
/// while it runs share its outcome, failures included.
pub struct KeyedQueryClient {
    api: Arc<dyn SecurityApi>,
    entries: DashMap<QueryKey, CacheEntry, FxBuildHasher>,
    inflight: Arc<InflightMap>,
    invalidations: broadcast::Sender<QueryKind>,
    request_timeout: Duration,
    retry: RetryPolicy,
}

impl KeyedQueryClient {
    pub fn new(api: Arc<dyn SecurityApi>, request_timeout: Duration, retry: RetryPolicy) -> Self {
        let (invalidations, _) = broadcast::channel(INVALIDATION_CHANNEL_CAPACITY);
        Self {
            api,
            entries: DashMap::with_hasher(FxBuildHasher),
            inflight: Arc::new(DashMap::with_hasher(FxBuildHasher)),
            invalidations,
            request_timeout,
            retry,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).map(|e| e.stale).unwrap_or(true)
    }

    pub fn updated_at(&self, key: &QueryKey) -> Option<Instant> {
        self.entries.get(key).map(|e| e.updated_at)
    }

    pub fn inflight_count(&self) -> usize {
        self.inflight.len()
    }

    fn register_or_join_inflight(
        &self,
        key: &QueryKey,
    ) -> (bool, watch::Receiver<Option<FetchOutcome>>) {
        match self.inflight.entry(key.clone()) {
            dashmap::Entry::Occupied(e) => {
                let rx = e.get().subscribe();
                drop(e);
                (false, rx)
            }
            dashmap::Entry::Vacant(e) => {
                let (tx, rx) = watch::channel(None::<FetchOutcome>);
                e.insert(Arc::new(tx));
                (true, rx)
            }
        }
    }

    async fn fetch_as_leader(&self, key: &QueryKey) -> FetchOutcome {
        let mut guard = InflightLeaderGuard {
            inflight: Arc::clone(&self.inflight),
            key: key.clone(),
            published: false,
        };

        debug!(key = %key, "Query fetch started");
        let outcome = self.fetch_with_retry(key).await.map(|data| self.store(key, data));

        if let Some((_, tx)) = self.inflight.remove(key) {
            let _ = tx.send(Some(outcome.clone()));
        }
        guard.published = true;

        drop(guard);
        outcome
    }

    async fn fetch_with_retry(&self, key: &QueryKey) -> Result<QueryData, DomainError> {
        let mut attempt = 1;
        loop {
            let result = match tokio::time::timeout(self.request_timeout, self.fetch_once(key))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(DomainError::Timeout(self.request_timeout.as_millis() as u64)),
            };

            match result {
                Ok(data) => return Ok(data),
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        key = %key,
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Query fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, key: &QueryKey) -> Result<QueryData, DomainError> {
        match key {
            QueryKey::SecurityLogs(query) => {
                self.api.fetch_logs(query).await.map(QueryData::SecurityLogs)
            }
            QueryKey::BlockedIps => self.api.list_blocked_ips().await.map(QueryData::BlockedIps),
            QueryKey::ThreatAlerts => self
                .api
                .list_threat_alerts()
                .await
                .map(QueryData::ThreatAlerts),
        }
    }

    /// Keeps the previous `Arc` when the payload did not change, so readers
    /// can compare by pointer.
    fn store(&self, key: &QueryKey, data: QueryData) -> Arc<QueryData> {
        let now = Instant::now();
        match self.entries.entry(key.clone()) {
            dashmap::Entry::Occupied(mut e) => {
                let entry = e.get_mut();
                if *entry.data != data {
                    entry.data = Arc::new(data);
                }
                entry.updated_at = now;
                entry.last_access = now;
                entry.stale = false;
                Arc::clone(&entry.data)
            }
            dashmap::Entry::Vacant(e) => {
                let data = Arc::new(data);
                e.insert(CacheEntry {
                    data: Arc::clone(&data),
                    updated_at: now,
                    last_access: now,
                    stale: false,
                });
                data
            }
        }
    }
}

#[async_trait]
impl QueryClient for KeyedQueryClient {
    async fn fetch(&self, key: &QueryKey) -> Result<Arc<QueryData>, DomainError> {
        loop {
            let (is_leader, mut rx) = self.register_or_join_inflight(key);
            if is_leader {
                return self.fetch_as_leader(key).await;
            }

            debug!(key = %key, "Joining in-flight query");
            if rx.changed().await.is_ok() {
                if let Some(outcome) = rx.borrow_and_update().clone() {
                    return outcome;
                }
            }
            // Leader went away without an outcome; compete for the slot again.
        }
    }

    fn peek(&self, key: &QueryKey) -> Option<Arc<QueryData>> {
        self.entries.get_mut(key).map(|mut entry| {
            entry.last_access = Instant::now();
            Arc::clone(&entry.data)
        })
    }

    fn invalidate(&self, kinds: &[QueryKind]) -> usize {
        let mut affected = 0;
        for mut entry in self.entries.iter_mut() {
            if kinds.contains(&entry.key().kind()) {
                entry.stale = true;
                affected += 1;
            }
        }

        for kind in kinds {
            let _ = self.invalidations.send(*kind);
        }

        debug!(kinds = ?kinds, affected, "Queries invalidated");
        affected
    }

    fn subscribe_invalidations(&self) -> broadcast::Receiver<QueryKind> {
        self.invalidations.subscribe()
    }
}

impl QueryCacheMaintenance for KeyedQueryClient {
    /// Drops entries nobody has read for longer than `gc_time`. Keys with a
    /// request on the wire are kept.
    fn collect_garbage(&self, gc_time: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            entry.last_access.elapsed() <= gc_time || self.inflight.contains_key(key)
        });
        before.saturating_sub(self.entries.len())
    }

    fn cached_entries(&self) -> usize {
        self.entries.len()
    }
}
