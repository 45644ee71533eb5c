use async_trait::async_trait;
use bytes::Bytes;
use votewatch_domain::{BlockIpRequest, BlockedIp, DomainError, LogPage, LogQuery, ThreatAlert};

/// Remote backend of the security dashboards.
#[async_trait]
pub trait SecurityApi: Send + Sync {
    async fn fetch_logs(&self, query: &LogQuery) -> Result<LogPage, DomainError>;
    async fn list_blocked_ips(&self) -> Result<Vec<BlockedIp>, DomainError>;
    async fn list_threat_alerts(&self) -> Result<Vec<ThreatAlert>, DomainError>;
    async fn block_ip(&self, request: &BlockIpRequest) -> Result<(), DomainError>;
    async fn unblock_ip(&self, ip_address: &str) -> Result<(), DomainError>;
    async fn export_logs(&self) -> Result<Bytes, DomainError>;
    async fn generate_report(&self) -> Result<Bytes, DomainError>;
}
