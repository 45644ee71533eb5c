use crate::log_query::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedIp {
    pub ip_address: String,
    #[serde(default)]
    pub reason: String,
    pub blocked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatAlert {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub severity: Option<Severity>,
    pub source_ip: Option<String>,
    pub detected_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockIpRequest {
    pub ip_address: String,
    pub reason: String,
}
