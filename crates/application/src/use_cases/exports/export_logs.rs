use super::{dated_file_name, Export};
use crate::ports::SecurityApi;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use votewatch_domain::DomainError;

pub struct ExportLogsUseCase {
    api: Arc<dyn SecurityApi>,
}

impl ExportLogsUseCase {
    pub fn new(api: Arc<dyn SecurityApi>) -> Self {
        Self { api }
    }

    pub async fn execute(&self) -> Result<Export, DomainError> {
        let bytes = self.api.export_logs().await?;
        let file_name = dated_file_name("security-logs", "csv", Utc::now());
        info!(file = %file_name, size = bytes.len(), "Security logs exported");
        Ok(Export { file_name, bytes })
    }
}
