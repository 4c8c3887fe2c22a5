//! Run a generate-and-copy action to completion.

use crate::app::{FormEvent, Session};
use crate::domain::{ActionId, ActionStatus, AppError};
use crate::ports::{ClipboardWriter, Clock, HostNotifier, PromptGenerator, StateStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeOutcome {
    pub action: ActionId,
    pub label: String,
    /// False when generation produced an empty prompt.
    pub copied: bool,
}

/// Invoke an action and drain the session until its result has been applied.
pub fn execute<S, G, C, N, K>(
    session: &mut Session<S, G, C, N, K>,
    action: &str,
) -> Result<InvokeOutcome, AppError>
where
    S: StateStore,
    G: PromptGenerator,
    C: ClipboardWriter,
    N: HostNotifier,
    K: Clock,
{
    let def = session
        .controller()
        .catalog()
        .action(action)
        .cloned()
        .ok_or_else(|| AppError::ActionNotFound(action.to_string()))?;

    session.submit(FormEvent::Invoke(action.to_string()))?;

    let status = session
        .controller()
        .action_state(action)
        .map(|state| state.status.clone())
        .unwrap_or(ActionStatus::Idle);

    match status {
        ActionStatus::Succeeded => {
            Ok(InvokeOutcome { action: def.id, label: def.label, copied: true })
        }
        ActionStatus::Failed(message) => {
            Err(AppError::ActionFailed { action: action.to_string(), message })
        }
        ActionStatus::Idle => Ok(InvokeOutcome { action: def.id, label: def.label, copied: false }),
        ActionStatus::Running => Err(AppError::ActionFailed {
            action: action.to_string(),
            message: "generation did not complete".to_string(),
        }),
    }
}
