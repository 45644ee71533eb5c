pub mod database;
pub mod drafts;
pub mod http;
pub mod query;
