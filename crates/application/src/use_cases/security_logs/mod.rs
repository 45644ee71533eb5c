mod fetch_security_logs;

pub use fetch_security_logs::FetchSecurityLogsUseCase;
