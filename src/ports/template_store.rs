use crate::domain::AppError;

/// Port for resolving prompt template text.
pub trait TemplateStore {
    /// Template for a mode's step type.
    fn template(&self, mode: &str, step_type: &str) -> Result<String, AppError>;

    /// `(mode, step_type)` pairs this store can serve.
    fn available(&self) -> Vec<(String, String)>;
}
