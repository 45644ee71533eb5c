use crate::ports::QueryClient;
use std::sync::Arc;
use votewatch_domain::{BlockedIp, DomainError, QueryKey};

pub struct GetBlockedIpsUseCase {
    client: Arc<dyn QueryClient>,
}

impl GetBlockedIpsUseCase {
    pub fn new(client: Arc<dyn QueryClient>) -> Self {
        Self { client }
    }

    pub async fn execute(&self) -> Result<Vec<BlockedIp>, DomainError> {
        let data = self.client.fetch(&QueryKey::BlockedIps).await?;
        data.as_blocked_ips()
            .map(<[BlockedIp]>::to_vec)
            .ok_or_else(|| DomainError::Decode("cached entry is not a blocked-ip list".into()))
    }
}
