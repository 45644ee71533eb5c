use crate::ports::QueryClient;
use std::sync::Arc;
use votewatch_domain::{DomainError, QueryKey, ThreatAlert};

pub struct GetThreatAlertsUseCase {
    client: Arc<dyn QueryClient>,
}

impl GetThreatAlertsUseCase {
    pub fn new(client: Arc<dyn QueryClient>) -> Self {
        Self { client }
    }

    /// Unresolved alerts first, keeping the server order inside each group.
    pub async fn execute(&self) -> Result<Vec<ThreatAlert>, DomainError> {
        let data = self.client.fetch(&QueryKey::ThreatAlerts).await?;
        let alerts = data
            .as_threat_alerts()
            .ok_or_else(|| DomainError::Decode("cached entry is not an alert list".into()))?;

        let mut sorted = alerts.to_vec();
        sorted.sort_by_key(|alert| alert.resolved);
        Ok(sorted)
    }
}
