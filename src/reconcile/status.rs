//! Update status snapshots and the update trigger
//! Source: podman auto-update [--dry-run] --format json

use crate::reconcile::inventory::UNIT_LABEL;
use crate::utils::{PodupError, Result};
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Pending,
    Updated,
    Failed,
}

impl UpdateStatus {
    /// Anything outside the known vocabulary (e.g. "false") means the
    /// container is current and is left out of the snapshot.
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(UpdateStatus::Pending),
            "updated" => Some(UpdateStatus::Updated),
            "failed" => Some(UpdateStatus::Failed),
            _ => None,
        }
    }
}

/// Point-in-time view of per-container update status. Absence from the map
/// means current/unknown.
#[derive(Debug, Clone, Default)]
pub struct UpdateSnapshot {
    statuses: BTreeMap<String, UpdateStatus>,
}

impl UpdateSnapshot {
    pub fn pending(&self) -> BTreeSet<String> {
        self.with_status(UpdateStatus::Pending)
    }

    pub fn failed(&self) -> BTreeSet<String> {
        self.with_status(UpdateStatus::Failed)
    }

    fn with_status(&self, wanted: UpdateStatus) -> BTreeSet<String> {
        self.statuses
            .iter()
            .filter(|(_, s)| **s == wanted)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

// ── Dry-run query ───────────────────────────────────────────────────────────

pub fn snapshot() -> Result<UpdateSnapshot> {
    let out = Command::new("podman")
        .args(["auto-update", "--dry-run", "--format", "json"])
        .output()
        .map_err(|e| PodupError::Podman(format!("dry-run status query failed: {}", e)))?;

    if !out.status.success() {
        return Err(PodupError::Podman(format!(
            "dry-run status query exited non-zero: {}",
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    parse_snapshot(&out.stdout)
}

fn parse_snapshot(bytes: &[u8]) -> Result<UpdateSnapshot> {
    let v: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| PodupError::Parse(format!("auto-update JSON: {}", e)))?;

    let arr = v
        .as_array()
        .ok_or_else(|| PodupError::Parse("auto-update output is not an array".to_string()))?;

    let mut statuses = BTreeMap::new();
    for rec in arr {
        let name = rec["ContainerName"].as_str().unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        if let Some(status) = rec["Updated"].as_str().and_then(UpdateStatus::parse) {
            statuses.insert(name.to_string(), status);
        }
    }

    Ok(UpdateSnapshot { statuses })
}

// ── Update trigger ──────────────────────────────────────────────────────────

/// Run the update command once, for side effect. Failures are tolerated:
/// the after-snapshot decides what actually happened. The runtime complains
/// about every container lacking the unit label; those lines are noise here
/// because such containers are already excluded from reconciliation.
pub fn run_auto_update() {
    let out = match Command::new("podman").args(["auto-update"]).output() {
        Ok(out) => out,
        Err(e) => {
            warn!("podman auto-update could not be started: {}", e);
            return;
        }
    };

    if !out.status.success() {
        warn!(
            "podman auto-update exited non-zero ({})",
            out.status.code().map_or("signal".to_string(), |c| c.to_string())
        );
    }

    for line in String::from_utf8_lossy(&out.stderr).lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_benign_unit_warning(line) {
            debug!("auto-update (filtered): {}", line);
        } else {
            warn!("auto-update: {}", line);
        }
    }
    for line in String::from_utf8_lossy(&out.stdout).lines() {
        debug!("auto-update: {}", line);
    }
}

fn is_benign_unit_warning(line: &str) -> bool {
    line.contains(UNIT_LABEL)
}
