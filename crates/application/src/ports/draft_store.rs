use async_trait::async_trait;
use serde_json::Value;
use votewatch_domain::DomainError;

#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn save(&self, key: &str, payload: &Value) -> Result<(), DomainError>;
    async fn load(&self, key: &str) -> Result<Option<Value>, DomainError>;
    /// Returns whether a draft existed.
    async fn clear(&self, key: &str) -> Result<bool, DomainError>;
}
