pub mod catalog;

pub use catalog::{
    ActionDef, ActionSpec, FieldDef, FieldSpec, ModeSpec, StepSpec, SyncEdge, WorkflowCatalog,
};
