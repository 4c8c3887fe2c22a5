//! Messages exchanged between the form controller and its host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::ModeId;

use super::Snapshot;

/// Prompt generation request handed to the templating collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub step_type: String,
    pub mode: ModeId,
    /// Placeholder name to field value.
    pub fields: BTreeMap<String, String>,
    pub correlation_id: String,
}

/// Informational notifications for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum HostEvent {
    ModeChange {
        mode: ModeId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<usize>,
    },
    StepChange {
        mode: ModeId,
        step: usize,
    },
    ResetForm {
        mode: ModeId,
    },
}

/// Work the host must carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Best-effort save of the current snapshot.
    Persist(Snapshot),
    Notify(HostEvent),
    Generate(GenerationRequest),
    /// Fire-and-forget clipboard copy.
    CopyToClipboard(String),
}
