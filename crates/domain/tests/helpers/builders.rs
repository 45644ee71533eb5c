#![allow(dead_code)]
use chrono::{DateTime, TimeZone, Utc};
use votewatch_domain::{LogPage, LogRecord, LogStatus, Pagination, Severity};

pub struct LogRecordBuilder {
    id: String,
    event: String,
    user: Option<String>,
    severity: Option<Severity>,
    status: Option<LogStatus>,
    timestamp: DateTime<Utc>,
    ip_address: String,
    user_agent: Option<String>,
    risk_score: Option<u8>,
}

impl LogRecordBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            event: "Login Attempt".to_string(),
            user: Some("jdoe".to_string()),
            severity: Some(Severity::Medium),
            status: Some(LogStatus::Success),
            timestamp: Utc.with_ymd_and_hms(2024, 11, 2, 9, 30, 0).unwrap(),
            ip_address: "192.168.1.100".to_string(),
            user_agent: Some("Firefox/128.0 (X11)".to_string()),
            risk_score: None,
        }
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn status(mut self, status: LogStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn risk_score(mut self, score: u8) -> Self {
        self.risk_score = Some(score);
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.user = None;
        self
    }

    pub fn build(self) -> LogRecord {
        LogRecord {
            id: self.id,
            event: self.event,
            user: self.user,
            user_type: Some("admin".to_string()),
            details: "details".to_string(),
            category: "Authentication".to_string(),
            severity: self.severity,
            status: self.status,
            timestamp: self.timestamp,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            risk_score: self.risk_score,
        }
    }
}

pub fn page_of(records: Vec<LogRecord>, has_next: bool) -> LogPage {
    LogPage {
        total_records: records.len() as u64,
        logs: records,
        pagination: Pagination { has_next },
    }
}
