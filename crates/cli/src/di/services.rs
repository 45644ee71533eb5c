use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use votewatch_application::ports::{DraftStore, QueryClient, SecurityApi};
use votewatch_domain::{Config, DomainError};
use votewatch_infrastructure::drafts::SqliteDraftStore;
use votewatch_infrastructure::http::HttpSecurityApi;
use votewatch_infrastructure::query::{KeyedQueryClient, RetryPolicy};

pub struct Services {
    pub api: Arc<dyn SecurityApi>,
    pub query_client: Arc<KeyedQueryClient>,
    pub drafts: Arc<dyn DraftStore>,
}

impl Services {
    pub fn new(config: &Config, pool: SqlitePool) -> Result<Self, DomainError> {
        let timeout = Duration::from_millis(config.api.request_timeout_ms);
        let api: Arc<dyn SecurityApi> = Arc::new(HttpSecurityApi::new(
            config.api.base_url.clone(),
            config.api.auth_token.clone(),
            timeout,
        )?);

        let query_client = Arc::new(KeyedQueryClient::new(
            Arc::clone(&api),
            timeout,
            RetryPolicy::from_config(&config.retry),
        ));

        Ok(Self {
            api,
            query_client,
            drafts: Arc::new(SqliteDraftStore::new(pool)),
        })
    }

    pub fn client(&self) -> Arc<dyn QueryClient> {
        self.query_client.clone()
    }
}
