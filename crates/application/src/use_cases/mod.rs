pub mod drafts;
pub mod exports;
pub mod security_logs;
pub mod threats;

pub use drafts::{ClearFormDraftUseCase, LoadFormDraftUseCase, SaveFormDraftUseCase};
pub use exports::{Export, ExportLogsUseCase, GenerateReportUseCase};
pub use security_logs::FetchSecurityLogsUseCase;
pub use threats::{BlockIpUseCase, GetBlockedIpsUseCase, GetThreatAlertsUseCase, UnblockIpUseCase};
