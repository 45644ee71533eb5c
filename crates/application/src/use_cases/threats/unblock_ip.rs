use super::{validate_ip, BLOCK_AFFECTED_KINDS};
use crate::ports::{QueryClient, SecurityApi};
use std::sync::Arc;
use tracing::info;
use votewatch_domain::DomainError;

pub struct UnblockIpUseCase {
    api: Arc<dyn SecurityApi>,
    client: Arc<dyn QueryClient>,
}

impl UnblockIpUseCase {
    pub fn new(api: Arc<dyn SecurityApi>, client: Arc<dyn QueryClient>) -> Self {
        Self { api, client }
    }

    pub async fn execute(&self, ip_address: &str) -> Result<(), DomainError> {
        let ip_address = validate_ip(ip_address)?;

        self.api.unblock_ip(&ip_address).await?;

        let invalidated = self.client.invalidate(&BLOCK_AFFECTED_KINDS);
        info!(ip = %ip_address, invalidated, "IP unblocked");
        Ok(())
    }
}
