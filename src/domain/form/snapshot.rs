use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serializable projection of the form: mode, step and every field value.
///
/// Identifiers are kept as plain strings so that a snapshot written by an older
/// catalog still loads; the controller reconciles it on restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: String,
    pub step: usize,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Stamped by the store on write; ignored by equality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn new(mode: impl Into<String>, step: usize, fields: BTreeMap<String, String>) -> Self {
        Self { mode: mode.into(), step, fields, saved_at: None }
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode && self.step == other.step && self.fields == other.fields
    }
}

impl Eq for Snapshot {}
