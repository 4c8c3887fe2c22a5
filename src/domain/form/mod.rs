//! Multi-mode step form: the controller and the messages it exchanges with its host.

mod action;
mod controller;
mod error;
mod messages;
mod snapshot;
mod view;

pub use action::{ActionState, ActionStatus};
pub use controller::{FormController, FormTimings};
pub use error::FormError;
pub use messages::{GenerationRequest, HostEvent, Outbound};
pub use snapshot::Snapshot;
pub use view::{ActionView, FieldView, FormView};
