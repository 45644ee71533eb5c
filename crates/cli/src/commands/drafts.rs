use crate::di::UseCases;

pub async fn show(use_cases: &UseCases, key: &str) -> anyhow::Result<()> {
    match use_cases.load_draft.execute_raw(key).await? {
        Some(draft) => println!("{}", serde_json::to_string_pretty(&draft)?),
        None => println!("No draft saved under '{}'", key),
    }
    Ok(())
}

pub async fn clear(use_cases: &UseCases, key: &str) -> anyhow::Result<()> {
    if use_cases.clear_draft.execute(key).await? {
        println!("Draft '{}' cleared", key);
    } else {
        println!("No draft saved under '{}'", key);
    }
    Ok(())
}
