use super::{dated_file_name, Export};
use crate::ports::SecurityApi;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use votewatch_domain::DomainError;

pub struct GenerateReportUseCase {
    api: Arc<dyn SecurityApi>,
}

impl GenerateReportUseCase {
    pub fn new(api: Arc<dyn SecurityApi>) -> Self {
        Self { api }
    }

    pub async fn execute(&self) -> Result<Export, DomainError> {
        let bytes = self.api.generate_report().await?;
        if bytes.is_empty() {
            return Err(DomainError::Decode("report endpoint returned an empty file".into()));
        }
        let file_name = dated_file_name("security-report", "pdf", Utc::now());
        info!(file = %file_name, size = bytes.len(), "Security report generated");
        Ok(Export { file_name, bytes })
    }
}
