mod block_ip;
mod get_blocked_ips;
mod get_threat_alerts;
mod unblock_ip;

pub use block_ip::BlockIpUseCase;
pub use get_blocked_ips::GetBlockedIpsUseCase;
pub use get_threat_alerts::GetThreatAlertsUseCase;
pub use unblock_ip::UnblockIpUseCase;

use votewatch_domain::{DomainError, QueryKind};

/// Entity families whose cached reads change when an IP is blocked or
/// unblocked.
pub(crate) const BLOCK_AFFECTED_KINDS: [QueryKind; 3] = [
    QueryKind::BlockedIps,
    QueryKind::ThreatAlerts,
    QueryKind::SecurityLogs,
];

pub(crate) fn validate_ip(ip_address: &str) -> Result<String, DomainError> {
    let trimmed = ip_address.trim();
    trimmed
        .parse::<std::net::IpAddr>()
        .map(|ip| ip.to_string())
        .map_err(|_| DomainError::InvalidIpAddress(trimmed.to_string()))
}
