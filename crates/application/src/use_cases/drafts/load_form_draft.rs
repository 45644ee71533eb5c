use super::validate_key;
use crate::ports::DraftStore;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;
use votewatch_domain::DomainError;

pub struct LoadFormDraftUseCase {
    store: Arc<dyn DraftStore>,
}

impl LoadFormDraftUseCase {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self { store }
    }

    /// A draft that no longer matches `T` is treated as absent.
    pub async fn execute<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DomainError> {
        let key = validate_key(key)?;
        let Some(payload) = self.store.load(key).await? else {
            return Ok(None);
        };

        match serde_json::from_value(payload) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                warn!(key, error = %e, "Ignoring incompatible form draft");
                Ok(None)
            }
        }
    }

    pub async fn execute_raw(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        let key = validate_key(key)?;
        self.store.load(key).await
    }
}
