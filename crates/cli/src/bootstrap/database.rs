use sqlx::SqlitePool;
use tracing::{error, info};
use votewatch_infrastructure::database::create_pool;

pub async fn init_database(database_url: &str) -> anyhow::Result<SqlitePool> {
    info!(url = database_url, "Initializing draft database");

    let pool = create_pool(database_url).await.map_err(|e| {
        error!(error = %e, "Failed to initialize draft database");
        anyhow::anyhow!(e)
    })?;

    info!("Draft database ready");
    Ok(pool)
}
