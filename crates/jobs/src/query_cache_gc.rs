use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use votewatch_application::ports::QueryCacheMaintenance;

const DEFAULT_GC_INTERVAL_SECS: u64 = 60;
const DEFAULT_GC_TIME_SECS: u64 = 300;

pub struct QueryCacheGcJob {
    cache: Arc<dyn QueryCacheMaintenance>,
    interval: Duration,
    gc_time: Duration,
    shutdown: CancellationToken,
}

impl QueryCacheGcJob {
    pub fn new(cache: Arc<dyn QueryCacheMaintenance>) -> Self {
        Self {
            cache,
            interval: Duration::from_secs(DEFAULT_GC_INTERVAL_SECS),
            gc_time: Duration::from_secs(DEFAULT_GC_TIME_SECS),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_timing(mut self, interval: Duration, gc_time: Duration) -> Self {
        self.interval = interval;
        self.gc_time = gc_time;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval.as_secs(),
            gc_time_secs = self.gc_time.as_secs(),
            "Starting query cache GC job"
        );

        let mut interval = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("QueryCacheGcJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    let removed = self.cache.collect_garbage(self.gc_time);
                    if removed > 0 {
                        info!(
                            removed,
                            remaining = self.cache.cached_entries(),
                            "Query cache GC cycle completed"
                        );
                    } else {
                        debug!("Query cache GC cycle: nothing to evict");
                    }
                }
            }
        }
    }
}
