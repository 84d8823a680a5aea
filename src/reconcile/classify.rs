//! Bucket classification from before/after update snapshots.
//!
//! "Updated" is inferred by disappearance from the pending set between two
//! dry-run snapshots; the runtime gives no direct success signal. A container
//! that turns pending between the snapshots (a concurrent image pull) lands
//! in still_pending. That imprecision comes with the source data.

use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Classification {
    pub updated: Vec<String>,
    pub failed: Vec<String>,
    pub still_pending: Vec<String>,
    pub current: Vec<String>,
}

/// Partition the checked containers into disposition buckets. Every name
/// lands in exactly one bucket; input order is preserved within each.
pub fn classify(
    checked: &[String],
    before_pending: &BTreeSet<String>,
    after_pending: &BTreeSet<String>,
    failed: &BTreeSet<String>,
) -> Classification {
    let mut out = Classification::default();

    for name in checked {
        if failed.contains(name) {
            out.failed.push(name.clone());
        } else if after_pending.contains(name) {
            out.still_pending.push(name.clone());
        } else if before_pending.contains(name) {
            out.updated.push(name.clone());
        } else {
            out.current.push(name.clone());
        }
    }

    out
}
