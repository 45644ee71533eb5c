use crate::di::UseCases;
use std::path::Path;
use tracing::info;
use votewatch_application::use_cases::Export;

pub async fn export(use_cases: &UseCases, out: &Path) -> anyhow::Result<()> {
    let export = use_cases.export_logs.execute().await?;
    write_export(export, out).await
}

pub async fn report(use_cases: &UseCases, out: &Path) -> anyhow::Result<()> {
    let export = use_cases.generate_report.execute().await?;
    write_export(export, out).await
}

async fn write_export(export: Export, out: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(out).await?;
    let path = out.join(&export.file_name);
    tokio::fs::write(&path, &export.bytes).await?;

    info!(path = %path.display(), bytes = export.bytes.len(), "Download saved");
    println!("Saved {} ({} bytes)", path.display(), export.bytes.len());
    Ok(())
}
