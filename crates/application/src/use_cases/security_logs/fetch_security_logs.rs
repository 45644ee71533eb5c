use crate::ports::QueryClient;
use std::sync::Arc;
use votewatch_domain::{DomainError, LogQuery, QueryData, QueryKey};

pub struct FetchSecurityLogsUseCase {
    client: Arc<dyn QueryClient>,
}

impl FetchSecurityLogsUseCase {
    pub fn new(client: Arc<dyn QueryClient>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, query: &LogQuery) -> Result<Arc<QueryData>, DomainError> {
        if query.page == 0 || query.limit == 0 {
            return Err(DomainError::InvalidQuery(format!(
                "page and limit must be positive ({})",
                query
            )));
        }
        self.client
            .fetch(&QueryKey::SecurityLogs(query.clone()))
            .await
    }
}
