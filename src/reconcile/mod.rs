//! Update reconciliation pipeline.
//!
//! One invocation runs three sequential stages: inventory the auto-update
//! containers, trigger the update and diff the before/after dry-run
//! snapshots, then hand the outcome to the report layer.

pub mod classify;
pub mod inventory;
pub mod outcome;
pub mod status;

use crate::report::{self, SectionPolicy};
use anyhow::Context;
use log::{info, warn};

use inventory::ContainerRecord;
use outcome::{CheckedContainer, RunOutcome};
use status::UpdateSnapshot;

pub fn run_update(
    env_file: Option<&str>,
    all_sections: bool,
    no_notify: bool,
    secret_id: Option<&str>,
) -> anyhow::Result<()> {
    if let Some(path) = env_file {
        let loaded = crate::config::load_env_file(path)
            .with_context(|| format!("loading environment file {}", path))?;
        info!("loaded {} variables from {}", loaded, path);
    }

    // Resolve the webhook before touching the runtime: a run that cannot
    // report aborts up front.
    let webhook = if no_notify {
        None
    } else {
        Some(crate::secrets::resolve_webhook_url(secret_id).context("resolving webhook URL")?)
    };

    info!("collecting container inventory");
    let records = inventory::collect()?;
    let outcome = reconcile(&records);

    let policy = if all_sections {
        SectionPolicy::Always
    } else {
        SectionPolicy::OmitEmpty
    };
    let message = report::render(&outcome, policy);

    match webhook {
        Some(url) => report::webhook::deliver(&url, &message),
        None => println!("{}", message),
    }

    Ok(())
}

/// Read-only view: inventory plus a single dry-run snapshot, classified as
/// a no-op run (pending stays pending, nothing counts as updated).
pub fn run_status(output: &str) -> anyhow::Result<()> {
    let records = inventory::collect()?;
    let (checked, excluded) = split_records(&records);

    let snapshot = if checked.is_empty() {
        UpdateSnapshot::default()
    } else {
        status::snapshot()?
    };

    let names: Vec<String> = checked.iter().map(|c| c.name.clone()).collect();
    let pending = snapshot.pending();
    let classification = classify::classify(&names, &pending, &pending, &snapshot.failed());

    let outcome = RunOutcome {
        collected_at: today(),
        checked,
        excluded,
        classification,
        warnings: Vec::new(),
    };

    match output {
        "json" => println!("{}", serde_json::to_string_pretty(&outcome)?),
        "text" => print!("{}", report::render(&outcome, SectionPolicy::Always)),
        other => anyhow::bail!("unknown format: {}", other),
    }
    Ok(())
}

// ── Reconciliation ──────────────────────────────────────────────────────────

fn reconcile(records: &[ContainerRecord]) -> RunOutcome {
    let (checked, excluded) = split_records(records);

    // Nothing carries the unit label: skip the update and both snapshots.
    if checked.is_empty() {
        info!("no auto-update containers carry the unit label; nothing to reconcile");
        return RunOutcome {
            collected_at: today(),
            checked,
            excluded,
            classification: classify::Classification::default(),
            warnings: Vec::new(),
        };
    }

    let mut warnings = Vec::new();

    let before = snapshot_or_empty("before", &mut warnings);
    info!("triggering podman auto-update");
    status::run_auto_update();
    let after = snapshot_or_empty("after", &mut warnings);

    let names: Vec<String> = checked.iter().map(|c| c.name.clone()).collect();
    let classification =
        classify::classify(&names, &before.pending(), &after.pending(), &after.failed());

    RunOutcome {
        collected_at: today(),
        checked,
        excluded,
        classification,
        warnings,
    }
}

/// A snapshot that cannot be taken or parsed degrades to empty: the run
/// still produces a report, just a less informed one.
fn snapshot_or_empty(which: &str, warnings: &mut Vec<String>) -> UpdateSnapshot {
    match status::snapshot() {
        Ok(snap) => snap,
        Err(e) => {
            let msg = format!("{} snapshot unavailable, treating as empty: {}", which, e);
            warn!("{}", msg);
            warnings.push(msg);
            UpdateSnapshot::default()
        }
    }
}

fn split_records(records: &[ContainerRecord]) -> (Vec<CheckedContainer>, Vec<String>) {
    let mut checked = Vec::new();
    let mut excluded = Vec::new();
    for record in records {
        match &record.unit {
            Some(unit) => checked.push(CheckedContainer {
                name: record.name.clone(),
                unit: unit.clone(),
            }),
            None => excluded.push(record.name.clone()),
        }
    }
    (checked, excluded)
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
