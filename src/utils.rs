use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::error::SearchError;

/// Trim a user-supplied field, rejecting it when nothing is left.
pub fn required_trimmed(field: &str, value: &str) -> std::result::Result<String, SearchError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SearchError::InvalidRequest(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

/// Mask all but the last four characters of a secret for log output.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let visible: String = secret.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), visible)
}

pub async fn read_file_safe(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Read a file, or stdin when no path is given.
pub async fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => read_file_safe(path).await,
        None => tokio::task::spawn_blocking(|| {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok::<_, anyhow::Error>(buffer)
        })
        .await
        .context("stdin reader task failed")?,
    }
}
