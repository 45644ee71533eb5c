use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub const FILTERABLE: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::FILTERABLE
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown severity: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogStatus {
    Success,
    Failed,
    Warning,
    Critical,
    Pending,
    Blocked,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(other)]
    Unknown,
}

impl LogStatus {
    pub const FILTERABLE: [LogStatus; 7] = [
        LogStatus::Success,
        LogStatus::Failed,
        LogStatus::Warning,
        LogStatus::Critical,
        LogStatus::Pending,
        LogStatus::Blocked,
        LogStatus::InProgress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Success => "Success",
            LogStatus::Failed => "Failed",
            LogStatus::Warning => "Warning",
            LogStatus::Critical => "Critical",
            LogStatus::Pending => "Pending",
            LogStatus::Blocked => "Blocked",
            LogStatus::InProgress => "In Progress",
            LogStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], " ");
        LogStatus::FILTERABLE
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown status: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Timestamp,
    Severity,
    Status,
    RiskScore,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Timestamp => "timestamp",
            SortField::Severity => "severity",
            SortField::Status => "status",
            SortField::RiskScore => "riskScore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Parameter set for one security-log query.
///
/// Structural equality over every field is the cache-key contract: two
/// queries with equal fields share one cache entry and one in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LogStatus>,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            severity: None,
            status: None,
        }
    }
}

impl LogQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            ..Self::default()
        }
    }

    /// Clamps `page` and `limit` to at least 1.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.max(1),
            ..self
        }
    }

    pub fn has_filters(&self) -> bool {
        self.severity.is_some() || self.status.is_some()
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sortBy", self.sort_by.as_str().to_string()),
            ("sortOrder", self.sort_order.as_str().to_string()),
        ];
        if let Some(severity) = self.severity {
            pairs.push(("severity", severity.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs
    }
}

impl fmt::Display for LogQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page={} limit={} sort={}:{}",
            self.page,
            self.limit,
            self.sort_by.as_str(),
            self.sort_order.as_str()
        )?;
        if let Some(severity) = self.severity {
            write!(f, " severity={}", severity)?;
        }
        if let Some(status) = self.status {
            write!(f, " status={}", status)?;
        }
        Ok(())
    }
}
