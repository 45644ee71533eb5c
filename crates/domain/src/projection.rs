//! View-ready projections of security log data.
//!
//! Everything here is pure and total: unknown enum values and missing fields
//! map to neutral defaults instead of failing.

use crate::log_query::{LogQuery, LogStatus, Severity};
use crate::security_log::{LogPage, LogRecord};
use chrono::{DateTime, Utc};

pub const NEUTRAL_STYLE: &str = "bg-gray-100 text-gray-800";

pub const EMPTY_MESSAGE: &str = "No security logs recorded yet.";
pub const EMPTY_FILTERED_MESSAGE: &str = "No logs match the selected filters.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampStyle {
    /// `2024-03-12 08:15:00`
    Full,
    /// `Mar 12, 08:15`
    Compact,
}

/// Renders in UTC with English month names so every viewer sees the same text.
pub fn format_timestamp(instant: &DateTime<Utc>, style: TimestampStyle) -> String {
    match style {
        TimestampStyle::Full => instant.format("%Y-%m-%d %H:%M:%S").to_string(),
        TimestampStyle::Compact => instant.format("%b %-d, %H:%M").to_string(),
    }
}

pub fn status_style_class(status: Option<LogStatus>) -> &'static str {
    match status {
        Some(LogStatus::Success) => "bg-green-100 text-green-800",
        Some(LogStatus::Failed) => "bg-red-100 text-red-800",
        Some(LogStatus::Warning) => "bg-yellow-100 text-yellow-800",
        Some(LogStatus::Critical) => "bg-rose-200 text-rose-900",
        Some(LogStatus::Pending) => "bg-blue-100 text-blue-800",
        Some(LogStatus::Blocked) => "bg-purple-100 text-purple-800",
        Some(LogStatus::InProgress) => "bg-indigo-100 text-indigo-800",
        Some(LogStatus::Unknown) | None => NEUTRAL_STYLE,
    }
}

pub fn severity_style_class(severity: Option<Severity>) -> &'static str {
    match severity {
        Some(Severity::Critical) => "bg-red-600 text-white",
        Some(Severity::High) => "bg-orange-500 text-white",
        Some(Severity::Medium) => "bg-yellow-400 text-gray-900",
        Some(Severity::Low) => "bg-green-500 text-white",
        Some(Severity::Unknown) | None => NEUTRAL_STYLE,
    }
}

/// First whitespace-delimited token of the user agent (the browser family).
pub fn truncate_user_agent(user_agent: Option<&str>) -> String {
    user_agent
        .and_then(|ua| ua.split_whitespace().next())
        .unwrap_or_default()
        .to_string()
}

pub fn should_show_risk(risk_score: Option<u8>) -> bool {
    matches!(risk_score, Some(score) if score > 0)
}

pub fn empty_message(filtered: bool) -> &'static str {
    if filtered {
        EMPTY_FILTERED_MESSAGE
    } else {
        EMPTY_MESSAGE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub id: String,
    pub event: String,
    pub user: String,
    pub user_type: Option<String>,
    pub details: String,
    pub category: String,
    pub severity_label: String,
    pub severity_class: &'static str,
    pub status_label: String,
    pub status_class: &'static str,
    pub timestamp: String,
    pub timestamp_compact: String,
    pub ip_address: String,
    pub browser: String,
    pub risk_score: Option<u8>,
}

impl From<&LogRecord> for LogRow {
    fn from(record: &LogRecord) -> Self {
        Self {
            id: record.id.clone(),
            event: record.event.clone(),
            user: record.user.clone().unwrap_or_else(|| "System".to_string()),
            user_type: record.user_type.clone(),
            details: record.details.clone(),
            category: record.category.clone(),
            severity_label: record
                .severity
                .map(|s| s.to_string())
                .unwrap_or_default(),
            severity_class: severity_style_class(record.severity),
            status_label: record.status.map(|s| s.to_string()).unwrap_or_default(),
            status_class: status_style_class(record.status),
            timestamp: format_timestamp(&record.timestamp, TimestampStyle::Full),
            timestamp_compact: format_timestamp(&record.timestamp, TimestampStyle::Compact),
            ip_address: record.ip_address.clone(),
            browser: truncate_user_agent(record.user_agent.as_deref()),
            risk_score: record
                .risk_score
                .filter(|&score| should_show_risk(Some(score))),
        }
    }
}

pub fn project_rows(page: &LogPage) -> Vec<LogRow> {
    page.logs.iter().map(LogRow::from).collect()
}

/// Fetch flags for the active query, as exposed to the view layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStatus {
    pub is_loading: bool,
    pub is_fetching: bool,
    pub is_error: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    Loading,
    Error {
        message: String,
    },
    Empty {
        filtered: bool,
    },
    Populated {
        rows: Vec<LogRow>,
        total_records: u64,
        has_more: bool,
    },
}

impl RenderState {
    /// Precedence: Loading, then Error, then Empty, then Populated.
    pub fn derive(status: &FetchStatus, page: Option<&LogPage>, query: &LogQuery) -> Self {
        if status.is_loading {
            return RenderState::Loading;
        }
        if status.is_error {
            return RenderState::Error {
                message: status
                    .error_message
                    .clone()
                    .unwrap_or_else(|| crate::errors::GENERIC_ERROR_MESSAGE.to_string()),
            };
        }
        match page {
            Some(page) if !page.is_empty() => RenderState::Populated {
                rows: project_rows(page),
                total_records: page.total_records,
                has_more: page.pagination.has_next,
            },
            Some(_) => RenderState::Empty {
                filtered: query.has_filters(),
            },
            // Nothing fetched yet and nothing in flight: the mount issuance
            // has not started, which the view treats as loading.
            None => RenderState::Loading,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RenderState::Loading => "loading",
            RenderState::Error { .. } => "error",
            RenderState::Empty { .. } => "empty",
            RenderState::Populated { .. } => "populated",
        }
    }
}
