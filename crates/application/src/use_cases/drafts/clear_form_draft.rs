use super::validate_key;
use crate::ports::DraftStore;
use std::sync::Arc;
use tracing::debug;
use votewatch_domain::DomainError;

pub struct ClearFormDraftUseCase {
    store: Arc<dyn DraftStore>,
}

impl ClearFormDraftUseCase {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, key: &str) -> Result<bool, DomainError> {
        let key = validate_key(key)?;
        let existed = self.store.clear(key).await?;
        debug!(key, existed, "Form draft cleared");
        Ok(existed)
    }
}
