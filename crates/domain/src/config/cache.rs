use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_gc_interval_secs")]
    pub gc_interval_secs: u64,

    /// Entries untouched for longer than this are dropped by the GC job.
    #[serde(default = "default_gc_time_secs")]
    pub gc_time_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            gc_interval_secs: default_gc_interval_secs(),
            gc_time_secs: default_gc_time_secs(),
        }
    }
}

fn default_gc_interval_secs() -> u64 {
    60
}

fn default_gc_time_secs() -> u64 {
    300
}
