pub mod dashboard_sync;
pub mod query_cache_gc;
pub mod runner;

pub use dashboard_sync::{DashboardSyncJob, FocusSignal, RefreshSignal};
pub use query_cache_gc::QueryCacheGcJob;
pub use runner::JobRunner;
