#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use votewatch_application::ports::SecurityApi;
use votewatch_domain::{
    BlockIpRequest, BlockedIp, DomainError, LogPage, LogQuery, LogRecord, LogStatus, Pagination,
    Severity, ThreatAlert,
};

pub fn make_record(id: &str) -> LogRecord {
    LogRecord {
        id: id.to_string(),
        event: "Login Attempt".to_string(),
        user: Some("admin@campus.edu".to_string()),
        user_type: Some("admin".to_string()),
        details: "Signed in".to_string(),
        category: "Authentication".to_string(),
        severity: Some(Severity::Medium),
        status: Some(LogStatus::Success),
        timestamp: Utc.with_ymd_and_hms(2024, 10, 1, 9, 30, 0).unwrap(),
        ip_address: "192.168.1.20".to_string(),
        user_agent: Some("Firefox/128.0 (X11)".to_string()),
        risk_score: Some(12),
    }
}

pub fn make_page(count: usize, has_next: bool) -> LogPage {
    LogPage {
        logs: (0..count).map(|i| make_record(&format!("rec-{}", i))).collect(),
        total_records: count as u64,
        pagination: Pagination { has_next },
    }
}

/// Security API double: every call sleeps `delay_ms`, then pops the next
/// scripted error (if any) before answering with `page`.
pub struct DelayedMockApi {
    call_count: AtomicUsize,
    delay_ms: u64,
    page: Mutex<LogPage>,
    failures: Mutex<VecDeque<DomainError>>,
}

impl DelayedMockApi {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            call_count: AtomicUsize::new(0),
            delay_ms,
            page: Mutex::new(make_page(3, true)),
            failures: Mutex::new(VecDeque::new()),
        }
    }

    pub fn failing_with(self, errors: Vec<DomainError>) -> Self {
        *self.failures.lock().unwrap() = errors.into();
        self
    }

    pub fn set_page(&self, page: LogPage) {
        *self.page.lock().unwrap() = page;
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    async fn respond<T>(&self, value: impl FnOnce() -> T) -> Result<T, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        let failure = self.failures.lock().unwrap().pop_front();
        match failure {
            Some(e) => Err(e),
            None => Ok(value()),
        }
    }
}

#[async_trait]
impl SecurityApi for DelayedMockApi {
    async fn fetch_logs(&self, _query: &LogQuery) -> Result<LogPage, DomainError> {
        self.respond(|| self.page.lock().unwrap().clone()).await
    }

    async fn list_blocked_ips(&self) -> Result<Vec<BlockedIp>, DomainError> {
        self.respond(|| {
            vec![BlockedIp {
                ip_address: "203.0.113.9".to_string(),
                reason: "Brute force".to_string(),
                blocked_at: None,
            }]
        })
        .await
    }

    async fn list_threat_alerts(&self) -> Result<Vec<ThreatAlert>, DomainError> {
        self.respond(Vec::new).await
    }

    async fn block_ip(&self, _request: &BlockIpRequest) -> Result<(), DomainError> {
        self.respond(|| ()).await
    }

    async fn unblock_ip(&self, _ip_address: &str) -> Result<(), DomainError> {
        self.respond(|| ()).await
    }

    async fn export_logs(&self) -> Result<Bytes, DomainError> {
        self.respond(Bytes::new).await
    }

    async fn generate_report(&self) -> Result<Bytes, DomainError> {
        self.respond(Bytes::new).await
    }
}
