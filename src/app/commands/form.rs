//! Navigation and editing commands applied through a session.

use crate::app::{FormEvent, Session};
use crate::domain::{AppError, FormView};
use crate::ports::{ClipboardWriter, Clock, HostNotifier, PromptGenerator, StateStore};

/// One user-level change to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Status,
    SwitchMode(String),
    GoToStep(usize),
    NextStep,
    PreviousStep,
    SetField { field: String, value: String },
    Reset,
}

/// Apply a command and return the resulting view.
///
/// Unknown modes and fields are reported with the catalog's names before the
/// controller sees them.
pub fn execute<S, G, C, N, K>(
    session: &mut Session<S, G, C, N, K>,
    command: FormCommand,
) -> Result<FormView, AppError>
where
    S: StateStore,
    G: PromptGenerator,
    C: ClipboardWriter,
    N: HostNotifier,
    K: Clock,
{
    let event = match command {
        FormCommand::Status => FormEvent::Tick,
        FormCommand::SwitchMode(mode) => {
            session.controller().catalog().mode(&mode)?;
            FormEvent::SwitchMode(mode)
        }
        FormCommand::GoToStep(step) => FormEvent::GoToStep(step),
        FormCommand::NextStep => FormEvent::NextStep,
        FormCommand::PreviousStep => FormEvent::PreviousStep,
        FormCommand::SetField { field, value } => {
            if session.controller().catalog().field(&field).is_none() {
                return Err(AppError::FieldNotFound(field));
            }
            FormEvent::EditField { field, value }
        }
        FormCommand::Reset => FormEvent::Reset,
    };

    session.submit(event)?;
    Ok(session.view())
}
