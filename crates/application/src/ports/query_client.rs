use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;
use votewatch_domain::{DomainError, QueryData, QueryKey, QueryKind};

/// Keyed, shared cache in front of [`super::SecurityApi`].
///
/// Concurrent `fetch` calls for an equal key collapse into one request and
/// every caller receives that request's outcome.
#[async_trait]
pub trait QueryClient: Send + Sync {
    async fn fetch(&self, key: &QueryKey) -> Result<Arc<QueryData>, DomainError>;

    /// Last successful result for `key`, without touching the network.
    fn peek(&self, key: &QueryKey) -> Option<Arc<QueryData>>;

    /// Marks every entry of the given kinds stale and notifies subscribers.
    /// Returns the number of cached entries affected.
    fn invalidate(&self, kinds: &[QueryKind]) -> usize;

    fn subscribe_invalidations(&self) -> broadcast::Receiver<QueryKind>;
}
