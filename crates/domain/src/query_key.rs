use crate::log_query::LogQuery;
use crate::security_log::LogPage;
use crate::threat::{BlockedIp, ThreatAlert};
use std::fmt;

/// Cache key for every remote read the dashboards perform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    SecurityLogs(LogQuery),
    BlockedIps,
    ThreatAlerts,
}

impl QueryKey {
    pub fn kind(&self) -> QueryKind {
        match self {
            QueryKey::SecurityLogs(_) => QueryKind::SecurityLogs,
            QueryKey::BlockedIps => QueryKind::BlockedIps,
            QueryKey::ThreatAlerts => QueryKind::ThreatAlerts,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::SecurityLogs(query) => write!(f, "security-logs[{}]", query),
            QueryKey::BlockedIps => f.write_str("blocked-ips"),
            QueryKey::ThreatAlerts => f.write_str("threat-alerts"),
        }
    }
}

/// Entity family of a [`QueryKey`]; invalidation works at this granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    SecurityLogs,
    BlockedIps,
    ThreatAlerts,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::SecurityLogs => "security-logs",
            QueryKind::BlockedIps => "blocked-ips",
            QueryKind::ThreatAlerts => "threat-alerts",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    SecurityLogs(LogPage),
    BlockedIps(Vec<BlockedIp>),
    ThreatAlerts(Vec<ThreatAlert>),
}

impl QueryData {
    pub fn as_log_page(&self) -> Option<&LogPage> {
        match self {
            QueryData::SecurityLogs(page) => Some(page),
            _ => None,
        }
    }

    pub fn as_blocked_ips(&self) -> Option<&[BlockedIp]> {
        match self {
            QueryData::BlockedIps(ips) => Some(ips),
            _ => None,
        }
    }

    pub fn as_threat_alerts(&self) -> Option<&[ThreatAlert]> {
        match self {
            QueryData::ThreatAlerts(alerts) => Some(alerts),
            _ => None,
        }
    }
}
