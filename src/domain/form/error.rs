use thiserror::Error;

/// Rejected form transition.
///
/// The controller logs these and leaves its state untouched; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The view has not been constructed yet.
    #[error("View is not ready; transition ignored")]
    ViewNotReady,

    #[error("Mode '{0}' is not part of the workflow catalog")]
    UnknownMode(String),

    #[error("Step {step} is outside 1..={total} for mode '{mode}'")]
    StepOutOfRange { mode: String, step: usize, total: usize },

    #[error("Field '{0}' is not part of the workflow catalog")]
    UnknownField(String),

    #[error("Action '{0}' is not part of the workflow catalog")]
    UnknownAction(String),

    /// Belongs to a mode other than the active one.
    #[error("Action '{action}' is not available in mode '{mode}'")]
    ActionNotInMode { action: String, mode: String },

    /// Required fields are empty.
    #[error("Action '{0}' is disabled")]
    ActionDisabled(String),

    /// Running or still showing its last result.
    #[error("Action '{0}' is busy")]
    ActionBusy(String),

    #[error("Action '{0}' was just used; try again shortly")]
    CoolingDown(String),

    #[error("No in-flight action for correlation id '{0}'")]
    UnknownCorrelation(String),
}
