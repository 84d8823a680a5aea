//! Container inventory
//! Sources: podman ps / podman inspect

use crate::utils::{PodupError, Result};
use log::warn;
use std::process::Command;

/// Containers opted in to registry-based auto-updates carry this label.
pub const AUTOUPDATE_LABEL: &str = "io.containers.autoupdate";
/// Records the systemd unit that restarts the container after an update.
pub const UNIT_LABEL: &str = "PODMAN_SYSTEMD_UNIT";

#[derive(Debug, Clone)]
pub struct ContainerRecord {
    pub name: String,
    pub id: String,
    /// None means the container is excluded from reconciliation.
    pub unit: Option<String>,
}

// ── Collection ──────────────────────────────────────────────────────────────

/// One record per auto-update container, in the order the runtime reports
/// them. A container the runtime cannot inspect is skipped with a warning;
/// a failing list query aborts the run.
pub fn collect() -> Result<Vec<ContainerRecord>> {
    let ids = list_autoupdate_ids()?;
    let mut records = Vec::new();

    for id in &ids {
        match inspect_one(id) {
            Ok(record) => records.push(record),
            Err(e) => warn!("skipping container {}: {}", id, e),
        }
    }

    Ok(records)
}

fn list_autoupdate_ids() -> Result<Vec<String>> {
    let out = Command::new("podman")
        .args([
            "ps",
            "--filter",
            &format!("label={}", AUTOUPDATE_LABEL),
            "--format",
            "{{.ID}}",
        ])
        .output()
        .map_err(|e| PodupError::Podman(format!("podman ps failed: {}", e)))?;

    if !out.status.success() {
        return Err(PodupError::Podman(
            "podman ps failed — is Podman available?".to_string(),
        ));
    }

    Ok(String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}

fn inspect_one(id: &str) -> Result<ContainerRecord> {
    let out = Command::new("podman")
        .args(["inspect", id])
        .output()
        .map_err(|e| PodupError::Podman(format!("podman inspect failed: {}", e)))?;

    if !out.status.success() {
        return Err(PodupError::Podman(format!("container {} not found", id)));
    }

    let arr: serde_json::Value = serde_json::from_slice(&out.stdout)
        .map_err(|e| PodupError::Parse(format!("inspect JSON: {}", e)))?;

    let first = arr
        .as_array()
        .and_then(|a| a.first())
        .ok_or_else(|| PodupError::Parse("empty inspect result".to_string()))?;

    parse_record(first)
}

// ── Inspect parsing ─────────────────────────────────────────────────────────

fn parse_record(c: &serde_json::Value) -> Result<ContainerRecord> {
    let name: String = c["Name"]
        .as_str()
        .unwrap_or("")
        .trim_start_matches('/')
        .to_string();
    if name.is_empty() {
        return Err(PodupError::Parse("inspect record has no name".to_string()));
    }

    let id = c["Id"].as_str().unwrap_or("").chars().take(12).collect();

    let unit = c["Config"]["Labels"][UNIT_LABEL]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    Ok(ContainerRecord { name, id, unit })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspect_json(raw: &str) -> serde_json::Value {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn record_with_unit_label() {
        let c = inspect_json(
            r#"{
                "Id": "0123456789abcdef0123",
                "Name": "/web",
                "Config": {
                    "Labels": {
                        "io.containers.autoupdate": "registry",
                        "PODMAN_SYSTEMD_UNIT": "container-web.service"
                    }
                }
            }"#,
        );
        let record = parse_record(&c).unwrap();
        assert_eq!(record.name, "web");
        assert_eq!(record.id, "0123456789ab");
        assert_eq!(record.unit.as_deref(), Some("container-web.service"));
    }

    #[test]
    fn record_without_unit_label_is_excluded() {
        let c = inspect_json(
            r#"{
                "Id": "deadbeefcafe0000",
                "Name": "scratchpad",
                "Config": { "Labels": { "io.containers.autoupdate": "registry" } }
            }"#,
        );
        let record = parse_record(&c).unwrap();
        assert_eq!(record.name, "scratchpad");
        assert!(record.unit.is_none());
    }

    #[test]
    fn blank_unit_label_counts_as_missing() {
        let c = inspect_json(
            r#"{
                "Id": "deadbeefcafe0000",
                "Name": "web",
                "Config": { "Labels": { "PODMAN_SYSTEMD_UNIT": "   " } }
            }"#,
        );
        assert!(parse_record(&c).unwrap().unit.is_none());
    }

    #[test]
    fn nameless_record_is_rejected() {
        let c = inspect_json(r#"{"Id": "deadbeefcafe0000", "Config": {}}"#);
        assert!(matches!(
            parse_record(&c).unwrap_err(),
            PodupError::Parse(_)
        ));
    }
}
