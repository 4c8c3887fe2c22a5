pub mod configuration;
pub mod error;
pub mod form;
pub mod identities;
pub mod prompt;
pub mod workflow;

pub use configuration::{AppConfig, ConcatConfig, FetchConfig, TemplatesConfig, TimingsConfig};
pub use error::AppError;
pub use form::{
    ActionStatus, FormController, FormError, FormTimings, FormView, GenerationRequest, HostEvent,
    Outbound, Snapshot,
};
pub use identities::{ActionId, FieldId, ModeId};
pub use workflow::WorkflowCatalog;
