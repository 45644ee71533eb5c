mod export_logs;
mod generate_report;

pub use export_logs::ExportLogsUseCase;
pub use generate_report::GenerateReportUseCase;

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// A downloaded file, ready to be written by the host surface.
#[derive(Debug, Clone)]
pub struct Export {
    pub file_name: String,
    pub bytes: Bytes,
}

pub(crate) fn dated_file_name(prefix: &str, extension: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}.{}", prefix, now.format("%Y-%m-%d"), extension)
}
