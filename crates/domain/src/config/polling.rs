use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_true")]
    pub refetch_on_focus: bool,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            refetch_on_focus: true,
            page_size: default_page_size(),
        }
    }
}

fn default_interval_ms() -> u64 {
    30_000
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> u32 {
    crate::log_query::DEFAULT_PAGE_SIZE
}
