#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use votewatch_application::ports::{QueryCacheMaintenance, QueryClient, SecurityApi};
use votewatch_application::services::SecurityLogDashboard;
use votewatch_domain::{
    BlockIpRequest, BlockedIp, DomainError, LogPage, LogQuery, LogRecord, Pagination,
    ThreatAlert,
};
use votewatch_infrastructure::query::{KeyedQueryClient, RetryPolicy};

fn make_record(id: String) -> LogRecord {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "event": "Vote Cast",
        "details": "Ballot accepted",
        "category": "Voting",
        "severity": "Low",
        "status": "Success",
        "timestamp": "2024-10-01T12:00:00Z",
        "ipAddress": "10.0.0.1"
    }))
    .unwrap()
}

/// Backend double. Unfiltered queries answer after `slow_ms` with three
/// rows; filtered ones after `fast_ms` with a single row.
pub struct StubSecurityApi {
    slow_ms: u64,
    fast_ms: u64,
    calls: Mutex<Vec<LogQuery>>,
}

impl StubSecurityApi {
    pub fn new(slow_ms: u64, fast_ms: u64) -> Self {
        Self {
            slow_ms,
            fast_ms,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<LogQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecurityApi for StubSecurityApi {
    async fn fetch_logs(&self, query: &LogQuery) -> Result<LogPage, DomainError> {
        self.calls.lock().unwrap().push(query.clone());
        let (delay, rows) = if query.has_filters() {
            (self.fast_ms, 1)
        } else {
            (self.slow_ms, 3)
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(LogPage {
            logs: (0..rows).map(|i| make_record(format!("p{}-{}", query.page, i))).collect(),
            total_records: rows as u64,
            pagination: Pagination { has_next: false },
        })
    }

    async fn list_blocked_ips(&self) -> Result<Vec<BlockedIp>, DomainError> {
        Ok(Vec::new())
    }

    async fn list_threat_alerts(&self) -> Result<Vec<ThreatAlert>, DomainError> {
        Ok(Vec::new())
    }

    async fn block_ip(&self, _request: &BlockIpRequest) -> Result<(), DomainError> {
        Ok(())
    }

    async fn unblock_ip(&self, _ip_address: &str) -> Result<(), DomainError> {
        Ok(())
    }

    async fn export_logs(&self) -> Result<Bytes, DomainError> {
        Ok(Bytes::new())
    }

    async fn generate_report(&self) -> Result<Bytes, DomainError> {
        Ok(Bytes::new())
    }
}

pub struct Harness {
    pub api: Arc<StubSecurityApi>,
    pub client: Arc<KeyedQueryClient>,
    pub dashboard: Arc<SecurityLogDashboard>,
}

pub fn make_harness(slow_ms: u64, fast_ms: u64) -> Harness {
    let api = Arc::new(StubSecurityApi::new(slow_ms, fast_ms));
    let client = Arc::new(KeyedQueryClient::new(
        api.clone(),
        Duration::from_secs(5),
        RetryPolicy::none(),
    ));
    let dashboard = Arc::new(SecurityLogDashboard::new(
        client.clone() as Arc<dyn QueryClient>,
        LogQuery::default(),
    ));
    Harness {
        api,
        client,
        dashboard,
    }
}

pub struct MockQueryCache {
    gc_calls: AtomicUsize,
    last_gc_time: Mutex<Option<Duration>>,
}

impl MockQueryCache {
    pub fn new() -> Self {
        Self {
            gc_calls: AtomicUsize::new(0),
            last_gc_time: Mutex::new(None),
        }
    }

    pub fn gc_call_count(&self) -> usize {
        self.gc_calls.load(Ordering::SeqCst)
    }

    pub fn last_gc_time(&self) -> Option<Duration> {
        *self.last_gc_time.lock().unwrap()
    }
}

impl QueryCacheMaintenance for MockQueryCache {
    fn collect_garbage(&self, gc_time: Duration) -> usize {
        self.gc_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_gc_time.lock().unwrap() = Some(gc_time);
        1
    }

    fn cached_entries(&self) -> usize {
        0
    }
}
