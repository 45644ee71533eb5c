use super::Services;
use std::sync::Arc;
use votewatch_application::use_cases::{
    BlockIpUseCase, ClearFormDraftUseCase, ExportLogsUseCase, GenerateReportUseCase,
    GetBlockedIpsUseCase, GetThreatAlertsUseCase, LoadFormDraftUseCase, SaveFormDraftUseCase,
    UnblockIpUseCase,
};

pub struct UseCases {
    pub get_blocked_ips: Arc<GetBlockedIpsUseCase>,
    pub get_threat_alerts: Arc<GetThreatAlertsUseCase>,
    pub block_ip: Arc<BlockIpUseCase>,
    pub unblock_ip: Arc<UnblockIpUseCase>,
    pub export_logs: Arc<ExportLogsUseCase>,
    pub generate_report: Arc<GenerateReportUseCase>,
    pub save_draft: Arc<SaveFormDraftUseCase>,
    pub load_draft: Arc<LoadFormDraftUseCase>,
    pub clear_draft: Arc<ClearFormDraftUseCase>,
}

impl UseCases {
    pub fn new(services: &Services) -> Self {
        Self {
            get_blocked_ips: Arc::new(GetBlockedIpsUseCase::new(services.client())),
            get_threat_alerts: Arc::new(GetThreatAlertsUseCase::new(services.client())),
            block_ip: Arc::new(BlockIpUseCase::new(services.api.clone(), services.client())),
            unblock_ip: Arc::new(UnblockIpUseCase::new(services.api.clone(), services.client())),
            export_logs: Arc::new(ExportLogsUseCase::new(services.api.clone())),
            generate_report: Arc::new(GenerateReportUseCase::new(services.api.clone())),
            save_draft: Arc::new(SaveFormDraftUseCase::new(services.drafts.clone())),
            load_draft: Arc::new(LoadFormDraftUseCase::new(services.drafts.clone())),
            clear_draft: Arc::new(ClearFormDraftUseCase::new(services.drafts.clone())),
        }
    }
}
