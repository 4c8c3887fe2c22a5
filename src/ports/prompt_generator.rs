use crate::domain::{AppError, GenerationRequest};

/// Port for turning a generation request into prompt text.
pub trait PromptGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, AppError>;
}
