use std::path::Path;

use super::StoreError;

/// Reads one keyword per line, trimmed. Blank lines are dropped.
pub async fn load_keywords(path: &Path) -> Result<Vec<String>, StoreError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| StoreError::io(path, err))?;
    Ok(parse_keywords(&raw))
}

pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
