mod draft_store;
mod query_cache_maintenance;
mod query_client;
mod security_api;

pub use draft_store::DraftStore;
pub use query_cache_maintenance::QueryCacheMaintenance;
pub use query_client::QueryClient;
pub use security_api::SecurityApi;
