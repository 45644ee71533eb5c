use crate::{DashboardSyncJob, QueryCacheGcJob};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(DashboardSyncJob);
impl_spawnable_job!(QueryCacheGcJob);

fn spawn_job<J: SpawnableJob>(
    job: Option<J>,
    shutdown: &Option<CancellationToken>,
) -> Option<JoinHandle<()>> {
    job.map(|job| {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        Arc::new(job).start_job()
    })
}

pub struct JobRunner {
    dashboard_sync: Option<DashboardSyncJob>,
    query_cache_gc: Option<QueryCacheGcJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            dashboard_sync: None,
            query_cache_gc: None,
            shutdown: None,
        }
    }

    pub fn with_dashboard_sync(mut self, job: DashboardSyncJob) -> Self {
        self.dashboard_sync = Some(job);
        self
    }

    pub fn with_query_cache_gc(mut self, job: QueryCacheGcJob) -> Self {
        self.query_cache_gc = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    /// Spawns every configured job. The returned handles complete once the
    /// shutdown token is cancelled.
    pub fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");

        let handles: Vec<_> = [
            spawn_job(self.dashboard_sync, &self.shutdown),
            spawn_job(self.query_cache_gc, &self.shutdown),
        ]
        .into_iter()
        .flatten()
        .collect();

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
