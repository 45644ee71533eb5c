use std::time::Duration;

/// Housekeeping side of the query cache, driven by a background job.
pub trait QueryCacheMaintenance: Send + Sync {
    /// Evicts entries unused for longer than `gc_time` and returns how many
    /// were dropped.
    fn collect_garbage(&self, gc_time: Duration) -> usize;

    fn cached_entries(&self) -> usize;
}
