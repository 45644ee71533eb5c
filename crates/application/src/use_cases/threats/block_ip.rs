use super::{validate_ip, BLOCK_AFFECTED_KINDS};
use crate::ports::{QueryClient, SecurityApi};
use std::sync::Arc;
use tracing::info;
use votewatch_domain::{BlockIpRequest, DomainError};

pub struct BlockIpUseCase {
    api: Arc<dyn SecurityApi>,
    client: Arc<dyn QueryClient>,
}

impl BlockIpUseCase {
    pub fn new(api: Arc<dyn SecurityApi>, client: Arc<dyn QueryClient>) -> Self {
        Self { api, client }
    }

    pub async fn execute(&self, ip_address: &str, reason: &str) -> Result<(), DomainError> {
        let ip_address = validate_ip(ip_address)?;
        let reason = reason.trim();
        let request = BlockIpRequest {
            ip_address: ip_address.clone(),
            reason: if reason.is_empty() {
                "Blocked from security dashboard".to_string()
            } else {
                reason.to_string()
            },
        };

        self.api.block_ip(&request).await?;

        let invalidated = self.client.invalidate(&BLOCK_AFFECTED_KINDS);
        info!(ip = %ip_address, invalidated, "IP blocked");
        Ok(())
    }
}
