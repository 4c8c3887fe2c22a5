//! Workflow catalog: modes, their ordered steps, fields, actions and sync edges.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::{ActionId, AppError, FieldId, ModeId};

const EMBEDDED_CATALOG: &str = include_str!("../../assets/workflows.toml");

/// Raw catalog document as written in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    #[serde(rename = "mode")]
    modes: Vec<ModeSpec>,
    #[serde(default)]
    sync: Vec<SyncEdge>,
}

/// A workflow variant with its ordered steps.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModeSpec {
    pub id: ModeId,
    pub title: String,
    /// Whether next/previous navigation applies.
    #[serde(default = "default_true")]
    pub navigable: bool,
    /// When false, every action of the mode is enabled while the mode is active.
    #[serde(default = "default_true")]
    pub fields_required: bool,
    #[serde(rename = "step")]
    pub steps: Vec<StepSpec>,
}

impl ModeSpec {
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Step at a 1-based position.
    pub fn step(&self, number: usize) -> Option<&StepSpec> {
        number.checked_sub(1).and_then(|index| self.steps.get(index))
    }
}

/// One page of fields within a mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepSpec {
    pub step_type: String,
    pub title: String,
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldSpec>,
    #[serde(default, rename = "action")]
    pub actions: Vec<ActionSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub id: FieldId,
    /// Template placeholder name the value is substituted for.
    pub placeholder: String,
    pub label: String,
    #[serde(default)]
    pub multiline: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionSpec {
    pub id: ActionId,
    pub label: String,
    /// Overrides the owning step's type in generation requests.
    #[serde(default)]
    pub step_type: Option<String>,
    #[serde(default)]
    pub requires: Vec<FieldId>,
    #[serde(default)]
    pub always_enabled: bool,
}

/// Copy-on-edit relationship from one field to others.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncEdge {
    pub source: FieldId,
    pub targets: Vec<FieldId>,
}

/// Resolved action definition carrying its explicit `(mode, step_type)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDef {
    pub id: ActionId,
    pub label: String,
    pub mode: ModeId,
    pub step: usize,
    pub step_type: String,
    pub requires: Vec<FieldId>,
    /// Enabled unconditionally while `mode` is active.
    pub forced: bool,
}

/// Resolved field definition with every step it appears on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub id: FieldId,
    pub placeholder: String,
    pub label: String,
    pub multiline: bool,
    pub steps: Vec<(ModeId, usize)>,
}

/// Validated, indexed workflow catalog.
#[derive(Debug, Clone)]
pub struct WorkflowCatalog {
    modes: Vec<ModeSpec>,
    fields: BTreeMap<FieldId, FieldDef>,
    actions: BTreeMap<ActionId, ActionDef>,
    sync: BTreeMap<FieldId, Vec<FieldId>>,
}

impl WorkflowCatalog {
    /// Catalog compiled into the binary.
    pub fn embedded() -> Result<Self, AppError> {
        Self::from_toml_str(EMBEDDED_CATALOG)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, AppError> {
        let document: CatalogDocument = toml::from_str(content)?;
        Self::from_document(document)
    }

    fn from_document(document: CatalogDocument) -> Result<Self, AppError> {
        if document.modes.is_empty() {
            return Err(AppError::InvalidCatalog("catalog declares no modes".into()));
        }

        let mut mode_ids: Vec<&ModeId> = Vec::new();
        let mut fields: BTreeMap<FieldId, FieldDef> = BTreeMap::new();
        let mut actions: BTreeMap<ActionId, ActionDef> = BTreeMap::new();

        for mode in &document.modes {
            if mode_ids.contains(&&mode.id) {
                return Err(AppError::InvalidCatalog(format!("duplicate mode '{}'", mode.id)));
            }
            mode_ids.push(&mode.id);

            if mode.steps.is_empty() {
                return Err(AppError::InvalidCatalog(format!("mode '{}' has no steps", mode.id)));
            }
            if !mode.navigable && mode.steps.len() != 1 {
                return Err(AppError::InvalidCatalog(format!(
                    "non-navigable mode '{}' must have exactly one step",
                    mode.id
                )));
            }

            for (index, step) in mode.steps.iter().enumerate() {
                let number = index + 1;
                for field in &step.fields {
                    match fields.get_mut(&field.id) {
                        Some(existing) if existing.placeholder == field.placeholder => {
                            existing.steps.push((mode.id.clone(), number));
                        }
                        Some(_) => {
                            return Err(AppError::InvalidCatalog(format!(
                                "field '{}' is redeclared with a different placeholder",
                                field.id
                            )));
                        }
                        None => {
                            fields.insert(
                                field.id.clone(),
                                FieldDef {
                                    id: field.id.clone(),
                                    placeholder: field.placeholder.clone(),
                                    label: field.label.clone(),
                                    multiline: field.multiline,
                                    steps: vec![(mode.id.clone(), number)],
                                },
                            );
                        }
                    }
                }

                for action in &step.actions {
                    if actions.contains_key(&action.id) {
                        return Err(AppError::InvalidCatalog(format!(
                            "duplicate action '{}'",
                            action.id
                        )));
                    }
                    actions.insert(
                        action.id.clone(),
                        ActionDef {
                            id: action.id.clone(),
                            label: action.label.clone(),
                            mode: mode.id.clone(),
                            step: number,
                            step_type: action
                                .step_type
                                .clone()
                                .unwrap_or_else(|| step.step_type.clone()),
                            requires: action.requires.clone(),
                            forced: action.always_enabled || !mode.fields_required,
                        },
                    );
                }
            }
        }

        for action in actions.values() {
            if let Some(missing) = action.requires.iter().find(|id| !fields.contains_key(*id)) {
                return Err(AppError::InvalidCatalog(format!(
                    "action '{}' requires unknown field '{}'",
                    action.id, missing
                )));
            }
        }

        let mut sync: BTreeMap<FieldId, Vec<FieldId>> = BTreeMap::new();
        for edge in document.sync {
            if !fields.contains_key(&edge.source) {
                return Err(AppError::InvalidCatalog(format!(
                    "sync source '{}' is not a known field",
                    edge.source
                )));
            }
            for target in &edge.targets {
                if !fields.contains_key(target) {
                    return Err(AppError::InvalidCatalog(format!(
                        "sync target '{}' is not a known field",
                        target
                    )));
                }
                if *target == edge.source {
                    return Err(AppError::InvalidCatalog(format!(
                        "sync edge from '{}' targets itself",
                        edge.source
                    )));
                }
            }
            sync.entry(edge.source).or_default().extend(edge.targets);
        }

        Ok(Self { modes: document.modes, fields, actions, sync })
    }

    pub fn modes(&self) -> &[ModeSpec] {
        &self.modes
    }

    /// First declared mode; the initial state starts here.
    pub fn default_mode(&self) -> &ModeSpec {
        &self.modes[0]
    }

    pub fn mode(&self, id: &str) -> Result<&ModeSpec, AppError> {
        self.modes.iter().find(|mode| mode.id.as_str() == id).ok_or_else(|| {
            AppError::ModeNotFound { name: id.to_string(), available: self.mode_names() }
        })
    }

    pub fn mode_names(&self) -> String {
        self.modes.iter().map(|mode| mode.id.as_str()).collect::<Vec<_>>().join(", ")
    }

    pub fn total_steps(&self, mode: &str) -> Option<usize> {
        self.mode(mode).ok().map(ModeSpec::total_steps)
    }

    pub fn field(&self, id: &str) -> Option<&FieldDef> {
        self.fields.get(id)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.values()
    }

    pub fn action(&self, id: &str) -> Option<&ActionDef> {
        self.actions.get(id)
    }

    pub fn actions(&self) -> impl Iterator<Item = &ActionDef> {
        self.actions.values()
    }

    /// Declared one-hop targets of a source field, in declaration order.
    pub fn sync_targets(&self, source: &str) -> &[FieldId] {
        self.sync.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Actions owned by a step, in declaration order.
    pub fn actions_on_step(&self, mode: &str, step: usize) -> Vec<&ActionDef> {
        let Ok(spec) = self.mode(mode) else {
            return Vec::new();
        };
        spec.step(step)
            .map(|step_spec| {
                step_spec.actions.iter().filter_map(|a| self.actions.get(&a.id)).collect()
            })
            .unwrap_or_default()
    }
}

fn default_true() -> bool {
    true
}
