//! Run preconditions: credentials file loading and required environment.

use crate::utils::{PodupError, Result};
use std::env;
use std::fs;

/// Access token the secrets-store CLI authenticates with.
pub const ENV_BWS_TOKEN: &str = "BWS_ACCESS_TOKEN";
/// Direct webhook URL override; skips the secrets-store lookup entirely.
pub const ENV_WEBHOOK_URL: &str = "PODUP_WEBHOOK_URL";
/// Secrets-store id of the secret holding the webhook URL.
pub const ENV_WEBHOOK_SECRET_ID: &str = "PODUP_WEBHOOK_SECRET_ID";

/// Load a KEY=VALUE credentials file into the process environment.
/// Returns the number of variables set. A named-but-missing file is a
/// precondition error, not a silent skip.
pub fn load_env_file(path: &str) -> Result<usize> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PodupError::Env(format!("environment file not found: {}", path))
        } else {
            PodupError::Io(e)
        }
    })?;

    let mut loaded = 0;
    for line in content.lines() {
        if let Some((key, value)) = parse_env_line(line) {
            env::set_var(&key, &value);
            loaded += 1;
        }
    }
    Ok(loaded)
}

/// One line of a shell-style env file: optional `export` prefix, optional
/// single or double quotes around the value. Blank lines and comments yield None.
fn parse_env_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line).trim_start();

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);

    Some((key.to_string(), value.to_string()))
}

/// The secrets-store token must be present before any lookup is attempted.
pub fn require_secrets_token() -> Result<()> {
    match env::var(ENV_BWS_TOKEN) {
        Ok(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(PodupError::Env(format!(
            "{} is not set; the secrets store cannot be queried",
            ENV_BWS_TOKEN
        ))),
    }
}
