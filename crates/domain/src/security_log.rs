use crate::log_query::{LogStatus, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One security log entry as served by the backend.
///
/// Upstream sends the identity either as `id` or as `_id`; both are folded
/// into [`LogRecord::id`] while decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawLogRecord")]
pub struct LogRecord {
    pub id: String,
    pub event: String,
    pub user: Option<String>,
    pub user_type: Option<String>,
    pub details: String,
    pub category: String,
    pub severity: Option<Severity>,
    pub status: Option<LogStatus>,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub risk_score: Option<u8>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLogRecord {
    id: Option<String>,
    #[serde(rename = "_id")]
    legacy_id: Option<String>,
    event: String,
    user: Option<String>,
    user_type: Option<String>,
    #[serde(default)]
    details: String,
    #[serde(default)]
    category: String,
    severity: Option<Severity>,
    status: Option<LogStatus>,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    ip_address: String,
    user_agent: Option<String>,
    risk_score: Option<u8>,
}

impl TryFrom<RawLogRecord> for LogRecord {
    type Error = String;

    fn try_from(raw: RawLogRecord) -> Result<Self, Self::Error> {
        let id = raw
            .id
            .or(raw.legacy_id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| "log record without id or _id".to_string())?;

        Ok(Self {
            id,
            event: raw.event,
            user: raw.user,
            user_type: raw.user_type,
            details: raw.details,
            category: raw.category,
            severity: raw.severity,
            status: raw.status,
            timestamp: raw.timestamp,
            ip_address: raw.ip_address,
            user_agent: raw.user_agent,
            risk_score: raw.risk_score.map(|score| score.min(100)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    #[serde(default)]
    pub logs: Vec<LogRecord>,
    #[serde(default)]
    pub total_records: u64,
    #[serde(default)]
    pub pagination: Pagination,
}

impl LogPage {
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}
