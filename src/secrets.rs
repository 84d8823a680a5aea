//! Webhook URL resolution
//! Source: bws secret get <id> (Bitwarden Secrets Manager CLI)

use crate::config;
use crate::utils::{PodupError, Result};
use std::env;
use std::process::Command;

/// Resolve the chat webhook URL. `PODUP_WEBHOOK_URL` wins when set;
/// otherwise the secrets store is queried with the given id (falling back
/// to `PODUP_WEBHOOK_SECRET_ID`). Any failure here aborts the run before
/// container work begins.
pub fn resolve_webhook_url(secret_id: Option<&str>) -> Result<String> {
    if let Ok(url) = env::var(config::ENV_WEBHOOK_URL) {
        let url = url.trim();
        if !url.is_empty() {
            return Ok(url.to_string());
        }
    }

    let id = secret_id
        .map(str::to_string)
        .or_else(|| env::var(config::ENV_WEBHOOK_SECRET_ID).ok())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            PodupError::Env(format!(
                "no webhook configured: set {} or pass a secret id",
                config::ENV_WEBHOOK_URL
            ))
        })?;

    config::require_secrets_token()?;
    fetch_secret_value(&id)
}

fn fetch_secret_value(id: &str) -> Result<String> {
    let out = Command::new("bws")
        .args(["secret", "get", id])
        .output()
        .map_err(|e| PodupError::Secrets(format!("bws invocation failed: {}", e)))?;

    if !out.status.success() {
        return Err(PodupError::Secrets(format!(
            "bws secret get failed: {}",
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    secret_value_from_json(&out.stdout)
}

fn secret_value_from_json(bytes: &[u8]) -> Result<String> {
    let j: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| PodupError::Parse(format!("bws secret JSON: {}", e)))?;

    let value = j["value"].as_str().unwrap_or("").trim();
    if value.is_empty() {
        return Err(PodupError::Secrets(
            "secret resolved to an empty value".to_string(),
        ));
    }
    Ok(value.to_string())
}
