//! Mode/step state machine, field synchronization, validation and action dispatch.
//!
//! The controller is single-threaded and free of I/O: every transition returns the
//! [`Outbound`] work the host has to carry out. Rejected transitions are logged and
//! leave the state exactly as it was.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::workflow::{ActionDef, ModeSpec, WorkflowCatalog};
use crate::domain::{ActionId, FieldId, ModeId};

use super::{
    ActionState, ActionStatus, ActionView, FieldView, FormError, FormView, GenerationRequest,
    HostEvent, Outbound, Snapshot,
};

/// Fixed delays applied around action results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormTimings {
    /// How long the success label stays before reverting to idle.
    pub success_revert: Duration,
    /// How long the error label stays before reverting to idle.
    pub failure_revert: Duration,
    /// Re-invocation guard after reverting to idle.
    pub cooldown: Duration,
}

impl Default for FormTimings {
    fn default() -> Self {
        Self {
            success_revert: Duration::from_millis(2000),
            failure_revert: Duration::from_millis(3000),
            cooldown: Duration::from_millis(500),
        }
    }
}

pub struct FormController {
    catalog: WorkflowCatalog,
    timings: FormTimings,
    mode: ModeId,
    step: usize,
    fields: BTreeMap<FieldId, String>,
    actions: BTreeMap<ActionId, ActionState>,
    in_flight: BTreeMap<String, ActionId>,
    view_ready: bool,
    last_persisted: Option<Snapshot>,
}

impl FormController {
    /// Create a controller at `(first mode, step 1)` with every field empty.
    pub fn new(catalog: WorkflowCatalog, timings: FormTimings) -> Self {
        let mode = catalog.default_mode().id.clone();
        let fields = catalog.fields().map(|f| (f.id.clone(), String::new())).collect();
        let actions = catalog.actions().map(|a| (a.id.clone(), ActionState::default())).collect();

        let mut controller = Self {
            catalog,
            timings,
            mode,
            step: 1,
            fields,
            actions,
            in_flight: BTreeMap::new(),
            view_ready: false,
            last_persisted: None,
        };
        controller.validate_all();
        controller
    }

    pub fn catalog(&self) -> &WorkflowCatalog {
        &self.catalog
    }

    pub fn mode(&self) -> &ModeId {
        &self.mode
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.active_mode().total_steps()
    }

    pub fn is_view_ready(&self) -> bool {
        self.view_ready
    }

    pub fn field_value(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    pub fn action_state(&self, id: &str) -> Option<&ActionState> {
        self.actions.get(id)
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.actions.get(id).is_some_and(|state| state.enabled)
    }

    /// Number of generation requests awaiting a result.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Earliest pending revert timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.actions.values().filter_map(|state| state.revert_at).min()
    }

    pub fn snapshot(&self) -> Snapshot {
        let fields =
            self.fields.iter().map(|(id, value)| (id.to_string(), value.clone())).collect();
        Snapshot::new(self.mode.as_str(), self.step, fields)
    }

    /// Record a snapshot the store has saved; identical states are not re-emitted.
    pub fn persisted(&mut self, snapshot: Snapshot) {
        self.last_persisted = Some(snapshot);
    }

    /// Reconcile a persisted snapshot before first render.
    ///
    /// Unknown modes fall back to the default mode, out-of-range steps to 1, and
    /// unknown field ids are dropped.
    pub fn restore(&mut self, snapshot: Option<Snapshot>) {
        let Some(snapshot) = snapshot else {
            debug!("No persisted snapshot; starting from the default mode");
            self.validate_all();
            return;
        };

        match self.catalog.mode(&snapshot.mode) {
            Ok(spec) => {
                self.mode = spec.id.clone();
                self.step = if (1..=spec.total_steps()).contains(&snapshot.step) {
                    snapshot.step
                } else {
                    warn!(
                        mode = %snapshot.mode,
                        step = snapshot.step,
                        "Persisted step out of range; resetting to step 1"
                    );
                    1
                };
            }
            Err(_) => {
                warn!(mode = %snapshot.mode, "Persisted mode is unknown; using default mode");
                self.mode = self.catalog.default_mode().id.clone();
                self.step = 1;
            }
        }

        for (id, value) in &snapshot.fields {
            match self.fields.get_mut(id.as_str()) {
                Some(slot) => *slot = value.clone(),
                None => debug!(field = %id, "Ignoring unknown field in persisted snapshot"),
            }
        }

        self.validate_all();
        self.last_persisted = Some(snapshot);
    }

    /// Mark the view as constructed and display the current mode and step.
    pub fn view_ready(&mut self) {
        self.view_ready = true;
        self.validate_all();
        debug!(mode = %self.mode, step = self.step, "View ready");
    }

    pub fn switch_mode(&mut self, target: &str) -> Result<Vec<Outbound>, FormError> {
        if !self.view_ready {
            return reject(FormError::ViewNotReady);
        }
        let Ok(spec) = self.catalog.mode(target) else {
            return reject(FormError::UnknownMode(target.to_string()));
        };
        if spec.id == self.mode {
            debug!(mode = %self.mode, "Mode already displayed");
            return Ok(Vec::new());
        }

        self.mode = spec.id.clone();
        self.step = 1;
        self.validate_all();
        debug!(mode = %self.mode, "Switched mode");

        let mut out = Vec::new();
        self.persist(&mut out);
        out.push(Outbound::Notify(HostEvent::ModeChange {
            mode: self.mode.clone(),
            step: Some(self.step),
        }));
        Ok(out)
    }

    pub fn go_to_step(&mut self, step: usize) -> Result<Vec<Outbound>, FormError> {
        if !self.view_ready {
            return reject(FormError::ViewNotReady);
        }
        let spec = self.active_mode();
        let (navigable, total) = (spec.navigable, spec.total_steps());

        if !navigable {
            debug!(mode = %self.mode, "Mode has a single step; redisplaying it");
            return Ok(Vec::new());
        }
        if step == 0 || step > total {
            return reject(FormError::StepOutOfRange {
                mode: self.mode.to_string(),
                step,
                total,
            });
        }

        self.step = step;
        self.validate_all();
        debug!(mode = %self.mode, step, "Moved to step");

        let mut out = Vec::new();
        self.persist(&mut out);
        out.push(Outbound::Notify(HostEvent::StepChange { mode: self.mode.clone(), step }));
        Ok(out)
    }

    pub fn next_step(&mut self) -> Result<Vec<Outbound>, FormError> {
        self.go_to_step(self.step + 1)
    }

    pub fn previous_step(&mut self) -> Result<Vec<Outbound>, FormError> {
        self.go_to_step(self.step.saturating_sub(1))
    }

    /// Set a field value and copy it along the field's declared sync edges (one hop).
    pub fn edit_field(
        &mut self,
        id: &str,
        value: impl Into<String>,
    ) -> Result<Vec<Outbound>, FormError> {
        let value = value.into();
        let Some(slot) = self.fields.get_mut(id) else {
            return reject(FormError::UnknownField(id.to_string()));
        };
        *slot = value.clone();

        for target in self.catalog.sync_targets(id) {
            if let Some(mirror) = self.fields.get_mut(target) {
                mirror.clone_from(&value);
            }
        }

        self.validate_all();
        let mut out = Vec::new();
        self.persist(&mut out);
        Ok(out)
    }

    /// Clear every field.
    pub fn reset(&mut self) -> Vec<Outbound> {
        for value in self.fields.values_mut() {
            value.clear();
        }
        self.validate_all();
        info!(mode = %self.mode, "Form reset");

        let mut out = Vec::new();
        self.persist(&mut out);
        out.push(Outbound::Notify(HostEvent::ResetForm { mode: self.mode.clone() }));
        out
    }

    /// Start an action: collect its fields and request generation.
    pub fn invoke(&mut self, id: &str, now: Instant) -> Result<Vec<Outbound>, FormError> {
        let Some(def) = self.catalog.action(id) else {
            return reject(FormError::UnknownAction(id.to_string()));
        };
        if def.mode != self.mode {
            return reject(FormError::ActionNotInMode {
                action: id.to_string(),
                mode: self.mode.to_string(),
            });
        }
        let Some(state) = self.actions.get_mut(id) else {
            return reject(FormError::UnknownAction(id.to_string()));
        };

        if !state.status.is_idle() {
            return reject(FormError::ActionBusy(id.to_string()));
        }
        if state.cooling_down(now) {
            return reject(FormError::CoolingDown(id.to_string()));
        }
        if !state.enabled {
            return reject(FormError::ActionDisabled(id.to_string()));
        }

        state.status = ActionStatus::Running;
        state.enabled = false;

        let mut collected = BTreeMap::new();
        for field_id in &def.requires {
            let value = self.fields.get(field_id).map(String::as_str).unwrap_or_default();
            let Some(field) = self.catalog.field(field_id) else {
                continue;
            };
            if value.trim().is_empty() {
                let message = format!("{} is required", field.label);
                warn!(action = %def.id, field = %field_id, "Required field empty at invocation");
                state.status = ActionStatus::Failed(message);
                state.revert_at = Some(now + self.timings.failure_revert);
                return Ok(Vec::new());
            }
            collected.insert(field.placeholder.clone(), value.to_string());
        }

        let correlation_id = Uuid::new_v4().to_string();
        state.correlation_id = Some(correlation_id.clone());
        self.in_flight.insert(correlation_id.clone(), def.id.clone());
        info!(
            action = %def.id,
            mode = %def.mode,
            step_type = %def.step_type,
            "Requesting prompt generation"
        );

        Ok(vec![Outbound::Generate(GenerationRequest {
            step_type: def.step_type.clone(),
            mode: def.mode.clone(),
            fields: collected,
            correlation_id,
        })])
    }

    /// Route a generation result back to the action that requested it.
    pub fn complete(
        &mut self,
        correlation_id: &str,
        result: Result<String, String>,
        now: Instant,
    ) -> Result<Vec<Outbound>, FormError> {
        let Some(action_id) = self.in_flight.remove(correlation_id) else {
            return reject(FormError::UnknownCorrelation(correlation_id.to_string()));
        };
        let (Some(def), Some(state)) =
            (self.catalog.action(&action_id), self.actions.get_mut(&action_id))
        else {
            return reject(FormError::UnknownAction(action_id.to_string()));
        };
        if state.status != ActionStatus::Running {
            warn!(action = %action_id, "Result arrived for an action that is not running");
            return Ok(Vec::new());
        }
        state.correlation_id = None;

        let mut out = Vec::new();
        match result {
            Ok(content) if !content.trim().is_empty() => {
                info!(action = %action_id, bytes = content.len(), "Prompt generated");
                state.status = ActionStatus::Succeeded;
                state.revert_at = Some(now + self.timings.success_revert);
                out.push(Outbound::CopyToClipboard(content));
            }
            Ok(_) => {
                warn!(action = %action_id, "Generation returned an empty prompt; nothing copied");
                state.status = ActionStatus::Idle;
                state.cooldown_until = Some(now + self.timings.cooldown);
                revalidate(def, &self.mode, &self.fields, state);
            }
            Err(message) => {
                warn!(action = %action_id, error = %message, "Prompt generation failed");
                state.status = ActionStatus::Failed(message);
                state.revert_at = Some(now + self.timings.failure_revert);
            }
        }
        Ok(out)
    }

    /// Revert due Succeeded/Failed labels to idle and start their cooldown.
    pub fn tick(&mut self, now: Instant) -> Vec<ActionId> {
        let mut reverted = Vec::new();
        for def in self.catalog.actions() {
            let Some(state) = self.actions.get_mut(&def.id) else {
                continue;
            };
            if !state.revert_due(now) {
                continue;
            }
            state.status = ActionStatus::Idle;
            state.revert_at = None;
            state.cooldown_until = Some(now + self.timings.cooldown);
            revalidate(def, &self.mode, &self.fields, state);
            reverted.push(def.id.clone());
        }
        reverted
    }

    /// Projection of the active mode and step for rendering.
    pub fn view(&self) -> FormView {
        let spec = self.active_mode();
        let step_spec = &spec.steps[self.step.clamp(1, spec.steps.len()) - 1];

        let fields = step_spec
            .fields
            .iter()
            .map(|field| FieldView {
                id: field.id.clone(),
                label: field.label.clone(),
                value: self.fields.get(&field.id).cloned().unwrap_or_default(),
                multiline: field.multiline,
            })
            .collect();

        let actions = step_spec
            .actions
            .iter()
            .filter_map(|action| {
                let def = self.catalog.action(&action.id)?;
                let state = self.actions.get(&action.id)?;
                Some(ActionView {
                    id: def.id.clone(),
                    label: state.status.presentation(&def.label),
                    status: state.status.clone(),
                    enabled: state.enabled,
                })
            })
            .collect();

        FormView {
            mode: spec.id.clone(),
            mode_title: spec.title.clone(),
            step: self.step,
            total_steps: spec.total_steps(),
            step_type: step_spec.step_type.clone(),
            step_title: step_spec.title.clone(),
            can_go_previous: spec.navigable && self.step > 1,
            can_go_next: spec.navigable && self.step < spec.total_steps(),
            fields,
            actions,
        }
    }

    fn active_mode(&self) -> &ModeSpec {
        self.catalog.mode(&self.mode).unwrap_or_else(|_| self.catalog.default_mode())
    }

    fn validate_all(&mut self) {
        for def in self.catalog.actions() {
            if let Some(state) = self.actions.get_mut(&def.id) {
                revalidate(def, &self.mode, &self.fields, state);
            }
        }
    }

    fn persist(&mut self, out: &mut Vec<Outbound>) {
        let snapshot = self.snapshot();
        if self.last_persisted.as_ref() == Some(&snapshot) {
            return;
        }
        out.push(Outbound::Persist(snapshot));
    }
}

/// Recompute the enabled flag of an idle action.
fn revalidate(
    def: &ActionDef,
    active_mode: &ModeId,
    fields: &BTreeMap<FieldId, String>,
    state: &mut ActionState,
) {
    if !state.status.is_idle() {
        return;
    }
    let forced = def.forced && def.mode == *active_mode;
    state.enabled = forced
        || def.requires.iter().all(|id| fields.get(id).is_some_and(|v| !v.trim().is_empty()));
}

fn reject<T>(err: FormError) -> Result<T, FormError> {
    warn!("{}", err);
    Err(err)
}
