//! Assembled run outcome: what the report layer consumes.

use crate::reconcile::classify::Classification;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CheckedContainer {
    pub name: String,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub collected_at: String,
    pub checked: Vec<CheckedContainer>,
    pub excluded: Vec<String>,
    #[serde(flatten)]
    pub classification: Classification,
    /// Degradations (e.g. an unparseable snapshot); logged, kept for the
    /// JSON rendering, never part of the chat message.
    pub warnings: Vec<String>,
}
