use serde::Serialize;

use crate::domain::{ActionId, FieldId, ModeId};

use super::ActionStatus;

/// What the panel currently shows for the active mode and step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub mode: ModeId,
    pub mode_title: String,
    pub step: usize,
    pub total_steps: usize,
    pub step_type: String,
    pub step_title: String,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub fields: Vec<FieldView>,
    pub actions: Vec<ActionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub id: FieldId,
    pub label: String,
    pub value: String,
    pub multiline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionView {
    pub id: ActionId,
    /// Status-dependent button text.
    pub label: String,
    pub status: ActionStatus,
    pub enabled: bool,
}
