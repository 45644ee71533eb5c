pub mod api;
pub mod cache;
pub mod drafts;
pub mod errors;
pub mod logging;
pub mod polling;
pub mod retry;
pub mod root;

pub use api::ApiConfig;
pub use cache::CacheConfig;
pub use drafts::DraftsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use polling::PollingConfig;
pub use retry::RetryConfig;
pub use root::{CliOverrides, Config};
