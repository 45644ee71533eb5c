//! Votewatch Domain Layer
pub mod config;
pub mod errors;
pub mod filter;
pub mod guard;
pub mod log_query;
pub mod projection;
pub mod query_key;
pub mod security_log;
pub mod threat;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use filter::{reduce, FilterAction, FilterState};
pub use guard::{logout_destination, GuardDecision, Role, RouteGuard, Session};
pub use log_query::{LogQuery, LogStatus, Severity, SortField, SortOrder};
pub use projection::{FetchStatus, LogRow, RenderState, TimestampStyle};
pub use query_key::{QueryData, QueryKey, QueryKind};
pub use security_log::{LogPage, LogRecord, Pagination};
pub use threat::{BlockIpRequest, BlockedIp, ThreatAlert};
