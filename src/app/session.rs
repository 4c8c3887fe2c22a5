//! Serialized event loop around the form controller.
//!
//! Events are handled one at a time in arrival order. Generation results come
//! back as events queued behind whatever was already waiting, which is what
//! makes a second click during a running action a no-op.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::adapters::{LogNotifier, SystemClock};
use crate::app::AppContext;
use crate::domain::{FormController, FormError, FormTimings, FormView, Outbound, WorkflowCatalog};
use crate::ports::{ClipboardWriter, Clock, HostNotifier, PromptGenerator, StateStore};

/// Input accepted by a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    ViewReady,
    SwitchMode(String),
    GoToStep(usize),
    NextStep,
    PreviousStep,
    EditField { field: String, value: String },
    Reset,
    Invoke(String),
    GenerationFinished { correlation_id: String, result: Result<String, String> },
    /// Only fires due revert timers.
    Tick,
}

pub struct Session<S, G, C, N = LogNotifier, K = SystemClock>
where
    S: StateStore,
    G: PromptGenerator,
    C: ClipboardWriter,
    N: HostNotifier,
    K: Clock,
{
    controller: FormController,
    ctx: AppContext<S, G, C, N, K>,
    queue: VecDeque<(u64, FormEvent)>,
    next_seq: u64,
}

impl<S, G, C, N, K> Session<S, G, C, N, K>
where
    S: StateStore,
    G: PromptGenerator,
    C: ClipboardWriter,
    N: HostNotifier,
    K: Clock,
{
    /// Restore persisted state without marking the view ready.
    ///
    /// A snapshot that cannot be loaded is treated as absent.
    pub fn open(
        catalog: WorkflowCatalog,
        timings: FormTimings,
        ctx: AppContext<S, G, C, N, K>,
    ) -> Self {
        let snapshot = match ctx.store().load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "Failed to load form state; starting fresh");
                None
            }
        };

        let mut controller = FormController::new(catalog, timings);
        controller.restore(snapshot);
        Self { controller, ctx, queue: VecDeque::new(), next_seq: 0 }
    }

    /// Open and immediately mark the view ready.
    pub fn start(
        catalog: WorkflowCatalog,
        timings: FormTimings,
        ctx: AppContext<S, G, C, N, K>,
    ) -> Self {
        let mut session = Self::open(catalog, timings, ctx);
        session.enqueue(FormEvent::ViewReady);
        session.drain();
        session
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn context(&self) -> &AppContext<S, G, C, N, K> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AppContext<S, G, C, N, K> {
        &mut self.ctx
    }

    pub fn view(&self) -> FormView {
        self.controller.view()
    }

    /// Events waiting to be handled.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue an event without handling it. Returns its sequence number.
    pub fn enqueue(&mut self, event: FormEvent) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push_back((seq, event));
        seq
    }

    /// Handle queued events until the queue is empty, including results queued
    /// along the way. Returns the rejected events by sequence number.
    pub fn drain(&mut self) -> Vec<(u64, FormError)> {
        let mut rejected = Vec::new();
        while let Some((seq, event)) = self.queue.pop_front() {
            if let Err(err) = self.handle(event) {
                rejected.push((seq, err));
            }
        }
        rejected
    }

    /// Queue one event, drain the queue and report whether that event was accepted.
    pub fn submit(&mut self, event: FormEvent) -> Result<(), FormError> {
        let seq = self.enqueue(event);
        match self.drain().into_iter().find(|(rejected, _)| *rejected == seq) {
            Some((_, err)) => Err(err),
            None => Ok(()),
        }
    }

    fn handle(&mut self, event: FormEvent) -> Result<(), FormError> {
        let now = self.ctx.clock().now();
        let reverted = self.controller.tick(now);
        if !reverted.is_empty() {
            debug!(count = reverted.len(), "Action labels reverted");
        }

        let outbound = match event {
            FormEvent::ViewReady => {
                self.controller.view_ready();
                Vec::new()
            }
            FormEvent::SwitchMode(mode) => self.controller.switch_mode(&mode)?,
            FormEvent::GoToStep(step) => self.controller.go_to_step(step)?,
            FormEvent::NextStep => self.controller.next_step()?,
            FormEvent::PreviousStep => self.controller.previous_step()?,
            FormEvent::EditField { field, value } => self.controller.edit_field(&field, value)?,
            FormEvent::Reset => self.controller.reset(),
            FormEvent::Invoke(action) => self.controller.invoke(&action, now)?,
            FormEvent::GenerationFinished { correlation_id, result } => {
                self.controller.complete(&correlation_id, result, now)?
            }
            FormEvent::Tick => Vec::new(),
        };

        for item in outbound {
            self.execute(item);
        }
        Ok(())
    }

    fn execute(&mut self, item: Outbound) {
        match item {
            Outbound::Persist(snapshot) => {
                match self.ctx.store_mut().save(&snapshot) {
                    Ok(()) => self.controller.persisted(snapshot),
                    Err(err) => warn!(error = %err, "Failed to persist form state"),
                }
            }
            Outbound::Notify(event) => self.ctx.notifier_mut().notify(&event),
            Outbound::Generate(request) => {
                let result = self.ctx.generator().generate(&request).map_err(|e| e.to_string());
                self.enqueue(FormEvent::GenerationFinished {
                    correlation_id: request.correlation_id,
                    result,
                });
            }
            Outbound::CopyToClipboard(text) => {
                if let Err(err) = self.ctx.clipboard_mut().write_text(&text) {
                    warn!(error = %err, "Failed to copy prompt to clipboard");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionStatus, HostEvent, ModeId, Snapshot};
    use crate::testing::{
        ManualClock, MemoryStateStore, MockClipboard, RecordingNotifier, StubGenerator,
    };
    use std::collections::BTreeMap;
    use std::time::Duration;

    type TestSession =
        Session<MemoryStateStore, StubGenerator, MockClipboard, RecordingNotifier, ManualClock>;

    fn session_with(store: MemoryStateStore, generator: StubGenerator) -> TestSession {
        let ctx = AppContext::with_host(
            store,
            generator,
            MockClipboard::new(),
            RecordingNotifier::default(),
            ManualClock::default(),
        );
        let catalog = WorkflowCatalog::embedded().unwrap();
        Session::start(catalog, FormTimings::default(), ctx)
    }

    fn session() -> TestSession {
        session_with(MemoryStateStore::new(), StubGenerator::default())
    }

    fn edit(field: &str, value: &str) -> FormEvent {
        FormEvent::EditField { field: field.to_string(), value: value.to_string() }
    }

    fn status(session: &TestSession, action: &str) -> ActionStatus {
        session.controller().action_state(action).unwrap().status.clone()
    }

    #[test]
    fn start_restores_persisted_snapshot() {
        let fields = BTreeMap::from([("debug-problem".to_string(), "crash".to_string())]);
        let store = MemoryStateStore::with_snapshot(Snapshot::new("debug", 3, fields));
        let session = session_with(store, StubGenerator::default());

        assert_eq!(session.controller().mode().as_str(), "debug");
        assert_eq!(session.controller().step(), 3);
        assert_eq!(session.controller().field_value("debug-problem"), Some("crash"));
        assert!(session.controller().is_view_ready());
    }

    #[test]
    fn unreadable_state_starts_from_default_mode() {
        let store = MemoryStateStore { fail_load: true, ..MemoryStateStore::new() };
        let session = session_with(store, StubGenerator::default());
        assert_eq!(session.controller().mode().as_str(), "create");
        assert_eq!(session.controller().step(), 1);
    }

    #[test]
    fn navigation_before_view_ready_is_rejected() {
        let ctx = AppContext::with_host(
            MemoryStateStore::new(),
            StubGenerator::default(),
            MockClipboard::new(),
            RecordingNotifier::default(),
            ManualClock::default(),
        );
        let mut session =
            Session::open(WorkflowCatalog::embedded().unwrap(), FormTimings::default(), ctx);

        let err = session.submit(FormEvent::SwitchMode("debug".into())).unwrap_err();
        assert_eq!(err, FormError::ViewNotReady);
        assert_eq!(session.controller().mode().as_str(), "create");

        session.submit(FormEvent::ViewReady).unwrap();
        session.submit(FormEvent::SwitchMode("debug".into())).unwrap();
        assert_eq!(session.controller().mode().as_str(), "debug");
    }

    #[test]
    fn invoke_generates_and_copies_prompt() {
        let mut session = session();
        session.submit(edit("request-idea", "  todo app ")).unwrap();
        session.submit(FormEvent::Invoke("generate-copy-create-request".into())).unwrap();

        let requests = session.context().generator().requests.borrow().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].step_type, "request");
        assert_eq!(requests[0].mode, ModeId::new("create").unwrap());
        assert_eq!(
            requests[0].fields,
            BTreeMap::from([("INITIAL_IDEA".to_string(), "  todo app ".to_string())])
        );

        assert_eq!(session.context().clipboard().last_written().as_deref(), Some("generated prompt"));
        assert_eq!(status(&session, "generate-copy-create-request"), ActionStatus::Succeeded);
        assert_eq!(session.controller().in_flight(), 0);
    }

    #[test]
    fn second_click_while_running_is_ignored() {
        let mut session = session();
        session.submit(edit("request-idea", "todo app")).unwrap();

        let first = session.enqueue(FormEvent::Invoke("generate-copy-create-request".into()));
        let second = session.enqueue(FormEvent::Invoke("generate-copy-create-request".into()));
        let rejected = session.drain();

        assert_eq!(session.context().generator().request_count(), 1);
        assert_eq!(session.context().clipboard().write_count(), 1);
        assert!(rejected.iter().all(|(seq, _)| *seq != first));
        assert!(rejected.iter().any(|(seq, err)| {
            *seq == second && *err == FormError::ActionBusy("generate-copy-create-request".into())
        }));
    }

    #[test]
    fn success_label_reverts_then_cools_down() {
        let mut session = session();
        let action = "generate-copy-create-request";
        session.submit(edit("request-idea", "todo app")).unwrap();
        session.submit(FormEvent::Invoke(action.into())).unwrap();

        session.context().clock().advance(Duration::from_millis(1999));
        session.submit(FormEvent::Tick).unwrap();
        assert_eq!(status(&session, action), ActionStatus::Succeeded);

        session.context().clock().advance(Duration::from_millis(1));
        let err = session.submit(FormEvent::Invoke(action.into())).unwrap_err();
        assert_eq!(err, FormError::CoolingDown(action.into()));
        assert_eq!(status(&session, action), ActionStatus::Idle);
        assert!(session.controller().is_enabled(action));

        session.context().clock().advance(Duration::from_millis(500));
        session.submit(FormEvent::Invoke(action.into())).unwrap();
        assert_eq!(session.context().generator().request_count(), 2);
    }

    #[test]
    fn generation_failure_shows_error_and_copies_nothing() {
        let mut session = session_with(MemoryStateStore::new(), StubGenerator::failing("boom"));
        let action = "generate-copy-create-request";
        session.submit(edit("request-idea", "todo app")).unwrap();
        session.submit(FormEvent::Invoke(action.into())).unwrap();

        assert_eq!(status(&session, action), ActionStatus::Failed("boom".into()));
        assert!(session.context().clipboard().last_written().is_none());
        let view = session.view();
        assert_eq!(view.actions[0].label, "Error: boom");

        session.context().clock().advance(Duration::from_millis(3000));
        session.submit(FormEvent::Tick).unwrap();
        assert_eq!(status(&session, action), ActionStatus::Idle);
    }

    #[test]
    fn clipboard_failure_does_not_fail_the_action() {
        let mut session = session();
        session.context().clipboard().set_should_fail(true);
        session.submit(edit("request-idea", "todo app")).unwrap();
        session.submit(FormEvent::Invoke("generate-copy-create-request".into())).unwrap();
        assert_eq!(status(&session, "generate-copy-create-request"), ActionStatus::Succeeded);
    }

    #[test]
    fn persistence_failure_does_not_reject_edits() {
        let store = MemoryStateStore { fail_save: true, ..MemoryStateStore::new() };
        let mut session = session_with(store, StubGenerator::default());
        session.submit(edit("request-idea", "todo app")).unwrap();
        assert_eq!(session.controller().field_value("request-idea"), Some("todo app"));
        assert!(session.context().store().saves.is_empty());
    }

    #[test]
    fn failed_save_is_retried_on_next_change() {
        let store = MemoryStateStore { fail_save: true, ..MemoryStateStore::new() };
        let mut session = session_with(store, StubGenerator::default());
        session.submit(edit("request-idea", "todo app")).unwrap();
        assert!(session.context().store().stored.is_none());

        session.context_mut().store_mut().fail_save = false;
        session.submit(edit("request-idea", "todo app")).unwrap();
        let stored = session.context().store().stored.clone().unwrap();
        assert_eq!(stored.fields.get("request-idea").map(String::as_str), Some("todo app"));

        session.submit(edit("request-idea", "todo app")).unwrap();
        assert_eq!(session.context().store().saves.len(), 1);
    }

    #[test]
    fn transitions_persist_and_notify() {
        let mut session = session();
        session.submit(edit("request-idea", "todo app")).unwrap();
        session.submit(FormEvent::SwitchMode("debug".into())).unwrap();
        session.submit(FormEvent::NextStep).unwrap();
        session.submit(FormEvent::Reset).unwrap();

        let debug = ModeId::new("debug").unwrap();
        assert_eq!(
            session.context().notifier().events,
            vec![
                HostEvent::ModeChange { mode: debug.clone(), step: Some(1) },
                HostEvent::StepChange { mode: debug.clone(), step: 2 },
                HostEvent::ResetForm { mode: debug },
            ]
        );

        let stored = session.context().store().stored.clone().unwrap();
        assert_eq!(stored.mode, "debug");
        assert_eq!(stored.step, 2);
        assert!(stored.fields.values().all(String::is_empty));
    }

    #[test]
    fn unknown_correlation_is_rejected() {
        let mut session = session();
        let err = session
            .submit(FormEvent::GenerationFinished {
                correlation_id: "stale".into(),
                result: Ok("late".into()),
            })
            .unwrap_err();
        assert_eq!(err, FormError::UnknownCorrelation("stale".into()));
        assert!(session.context().clipboard().last_written().is_none());
    }
}
