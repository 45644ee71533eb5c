use async_trait::async_trait;
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use votewatch_application::ports::{DraftStore, QueryClient, SecurityApi};
use votewatch_domain::{
    BlockIpRequest, BlockedIp, DomainError, LogPage, LogQuery, LogRecord, LogStatus, Pagination,
    QueryData, QueryKey, QueryKind, Severity, ThreatAlert,
};

pub fn make_record(id: &str) -> LogRecord {
    LogRecord {
        id: id.to_string(),
        event: "Vote Cast".to_string(),
        user: Some("student-42".to_string()),
        user_type: Some("voter".to_string()),
        details: "Ballot submitted".to_string(),
        category: "Voting".to_string(),
        severity: Some(Severity::Low),
        status: Some(LogStatus::Success),
        timestamp: Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap(),
        ip_address: "10.1.2.3".to_string(),
        user_agent: Some("Chrome/126.0 (Windows NT 10.0)".to_string()),
        risk_score: Some(0),
    }
}

pub fn make_page(count: usize, has_next: bool) -> LogPage {
    LogPage {
        logs: (0..count).map(|i| make_record(&format!("log-{}", i))).collect(),
        total_records: count as u64,
        pagination: Pagination { has_next },
    }
}

struct Scripted {
    delay: Duration,
    outcome: Result<QueryData, DomainError>,
}

/// Query client double with scripted, per-key delays and outcomes.
///
/// Successful outcomes are written to an internal cache so `peek` behaves
/// like the real client.
pub struct MockQueryClient {
    scripts: Mutex<HashMap<QueryKey, VecDeque<Scripted>>>,
    cache: Mutex<HashMap<QueryKey, Arc<QueryData>>>,
    calls: Mutex<Vec<QueryKey>>,
    invalidated: Mutex<Vec<QueryKind>>,
    invalidations: broadcast::Sender<QueryKind>,
}

impl MockQueryClient {
    pub fn new() -> Self {
        let (invalidations, _) = broadcast::channel(16);
        Self {
            scripts: Mutex::new(HashMap::new()),
            cache: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            invalidated: Mutex::new(Vec::new()),
            invalidations,
        }
    }

    pub fn script(&self, key: QueryKey, delay_ms: u64, outcome: Result<QueryData, DomainError>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(key)
            .or_default()
            .push_back(Scripted {
                delay: Duration::from_millis(delay_ms),
                outcome,
            });
    }

    pub fn script_logs(&self, query: &LogQuery, delay_ms: u64, page: LogPage) {
        self.script(
            QueryKey::SecurityLogs(query.clone()),
            delay_ms,
            Ok(QueryData::SecurityLogs(page)),
        );
    }

    pub fn script_logs_error(&self, query: &LogQuery, delay_ms: u64, error: DomainError) {
        self.script(QueryKey::SecurityLogs(query.clone()), delay_ms, Err(error));
    }

    pub fn seed(&self, key: QueryKey, data: QueryData) {
        self.cache.lock().unwrap().insert(key, Arc::new(data));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<QueryKey> {
        self.calls.lock().unwrap().clone()
    }

    pub fn invalidated_kinds(&self) -> Vec<QueryKind> {
        self.invalidated.lock().unwrap().clone()
    }
}

impl Default for MockQueryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryClient for MockQueryClient {
    async fn fetch(&self, key: &QueryKey) -> Result<Arc<QueryData>, DomainError> {
        self.calls.lock().unwrap().push(key.clone());
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(key)
            .and_then(VecDeque::pop_front);

        let Some(scripted) = scripted else {
            return Err(DomainError::Network(format!("no script for {}", key)));
        };

        tokio::time::sleep(scripted.delay).await;

        let data = Arc::new(scripted.outcome?);
        self.cache
            .lock()
            .unwrap()
            .insert(key.clone(), Arc::clone(&data));
        Ok(data)
    }

    fn peek(&self, key: &QueryKey) -> Option<Arc<QueryData>> {
        self.cache.lock().unwrap().get(key).cloned()
    }

    fn invalidate(&self, kinds: &[QueryKind]) -> usize {
        self.invalidated.lock().unwrap().extend_from_slice(kinds);
        for kind in kinds {
            let _ = self.invalidations.send(*kind);
        }
        self.cache
            .lock()
            .unwrap()
            .keys()
            .filter(|key| kinds.contains(&key.kind()))
            .count()
    }

    fn subscribe_invalidations(&self) -> broadcast::Receiver<QueryKind> {
        self.invalidations.subscribe()
    }
}

#[derive(Default)]
pub struct MockSecurityApi {
    blocked: Mutex<Vec<BlockIpRequest>>,
    unblocked: Mutex<Vec<String>>,
    fail_mutations: Mutex<Option<DomainError>>,
    export_payload: Mutex<Bytes>,
    export_calls: AtomicUsize,
}

impl MockSecurityApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_mutations_with(&self, error: DomainError) {
        *self.fail_mutations.lock().unwrap() = Some(error);
    }

    pub fn set_export_payload(&self, payload: &'static [u8]) {
        *self.export_payload.lock().unwrap() = Bytes::from_static(payload);
    }

    pub fn blocked_requests(&self) -> Vec<BlockIpRequest> {
        self.blocked.lock().unwrap().clone()
    }

    pub fn unblocked_ips(&self) -> Vec<String> {
        self.unblocked.lock().unwrap().clone()
    }

    pub fn export_calls(&self) -> usize {
        self.export_calls.load(Ordering::SeqCst)
    }

    fn mutation_result(&self) -> Result<(), DomainError> {
        match self.fail_mutations.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SecurityApi for MockSecurityApi {
    async fn fetch_logs(&self, _query: &LogQuery) -> Result<LogPage, DomainError> {
        Ok(LogPage::default())
    }

    async fn list_blocked_ips(&self) -> Result<Vec<BlockedIp>, DomainError> {
        Ok(vec![])
    }

    async fn list_threat_alerts(&self) -> Result<Vec<ThreatAlert>, DomainError> {
        Ok(vec![])
    }

    async fn block_ip(&self, request: &BlockIpRequest) -> Result<(), DomainError> {
        self.mutation_result()?;
        self.blocked.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn unblock_ip(&self, ip_address: &str) -> Result<(), DomainError> {
        self.mutation_result()?;
        self.unblocked.lock().unwrap().push(ip_address.to_string());
        Ok(())
    }

    async fn export_logs(&self) -> Result<Bytes, DomainError> {
        self.export_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.export_payload.lock().unwrap().clone())
    }

    async fn generate_report(&self) -> Result<Bytes, DomainError> {
        self.export_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.export_payload.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct MockDraftStore {
    drafts: Mutex<HashMap<String, Value>>,
}

impl MockDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drafts.lock().unwrap().len()
    }
}

#[async_trait]
impl DraftStore for MockDraftStore {
    async fn save(&self, key: &str, payload: &Value) -> Result<(), DomainError> {
        self.drafts
            .lock()
            .unwrap()
            .insert(key.to_string(), payload.clone());
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Value>, DomainError> {
        Ok(self.drafts.lock().unwrap().get(key).cloned())
    }

    async fn clear(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.drafts.lock().unwrap().remove(key).is_some())
    }
}
