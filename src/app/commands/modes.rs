//! Catalog listing.

use serde::Serialize;

use crate::domain::{ActionId, FieldId, ModeId, WorkflowCatalog};
use crate::ports::TemplateStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeSummary {
    pub id: ModeId,
    pub title: String,
    pub navigable: bool,
    pub steps: Vec<StepSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSummary {
    pub number: usize,
    pub step_type: String,
    pub title: String,
    pub fields: Vec<FieldId>,
    pub actions: Vec<ActionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSummary {
    pub id: ActionId,
    pub label: String,
    /// Whether a template exists for the action's `(mode, step_type)`.
    pub has_template: bool,
}

pub fn execute<T: TemplateStore>(catalog: &WorkflowCatalog, templates: &T) -> Vec<ModeSummary> {
    let available = templates.available();

    catalog
        .modes()
        .iter()
        .map(|mode| ModeSummary {
            id: mode.id.clone(),
            title: mode.title.clone(),
            navigable: mode.navigable,
            steps: mode
                .steps
                .iter()
                .enumerate()
                .map(|(index, step)| StepSummary {
                    number: index + 1,
                    step_type: step.step_type.clone(),
                    title: step.title.clone(),
                    fields: step.fields.iter().map(|field| field.id.clone()).collect(),
                    actions: catalog
                        .actions_on_step(&mode.id, index + 1)
                        .into_iter()
                        .map(|action| ActionSummary {
                            id: action.id.clone(),
                            label: action.label.clone(),
                            has_template: available.iter().any(|(m, s)| {
                                m == action.mode.as_str() && *s == action.step_type
                            }),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}
