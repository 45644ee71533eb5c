use super::validate_key;
use crate::ports::DraftStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use votewatch_domain::DomainError;

pub struct SaveFormDraftUseCase {
    store: Arc<dyn DraftStore>,
}

impl SaveFormDraftUseCase {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self { store }
    }

    pub async fn execute<T: Serialize>(&self, key: &str, draft: &T) -> Result<(), DomainError> {
        let key = validate_key(key)?;
        let payload =
            serde_json::to_value(draft).map_err(|e| DomainError::Storage(e.to_string()))?;
        self.store.save(key, &payload).await?;
        debug!(key, "Form draft saved");
        Ok(())
    }
}
