use crate::di::UseCases;
use crate::render;

pub async fn list(use_cases: &UseCases) -> anyhow::Result<()> {
    let (blocked, alerts) = tokio::try_join!(
        use_cases.get_blocked_ips.execute(),
        use_cases.get_threat_alerts.execute()
    )?;

    print!("{}", render::blocked_ips(&blocked));
    print!("{}", render::threat_alerts(&alerts));
    Ok(())
}

pub async fn block(use_cases: &UseCases, ip: &str, reason: Option<&str>) -> anyhow::Result<()> {
    use_cases.block_ip.execute(ip, reason.unwrap_or_default()).await?;
    println!("Blocked {}", ip);
    Ok(())
}

pub async fn unblock(use_cases: &UseCases, ip: &str) -> anyhow::Result<()> {
    use_cases.unblock_ip.execute(ip).await?;
    println!("Unblocked {}", ip);
    Ok(())
}
